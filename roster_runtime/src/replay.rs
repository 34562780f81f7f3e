//! Replay orchestrator — rebuild a branch directory from its inputs.
//!
//! Delegates all domain logic to the kernel. No shortcuts, no cached state.

use roster_engine::engine::project;
use roster_engine::events::RosterEvent;
use roster_engine::hashing::canonical_hash;
use roster_engine::state::BranchState;

/// Fold `events` over `base` and return (final_state, canonical_hash).
pub fn rebuild_branch(base: &BranchState, events: &[RosterEvent]) -> (BranchState, String) {
    let state = project(base, events);
    let hash = canonical_hash(&state);
    (state, hash)
}

/// Replay the same inputs twice and compare canonical hashes.
pub fn verify_determinism(base: &BranchState, events: &[RosterEvent]) -> bool {
    let (_, hash1) = rebuild_branch(base, events);
    let (_, hash2) = rebuild_branch(base, events);
    hash1 == hash2
}
