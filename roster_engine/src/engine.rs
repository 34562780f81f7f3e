//! Roster Engine — Projection Engine
//!
//! Folds an ordered event stream into a branch directory, one event at a
//! time, starting from a copy of the base snapshot. Delegates every
//! mutation to `transitions`.
//!
//! The fold reads no clock and no external state: the same base and the
//! same events always give the same directory.

use crate::events::RosterEvent;
use crate::state::BranchState;
use crate::transitions::{apply_event as transition_apply, Outcome};

/// Counts of what a fold did with its events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectionStats {
    pub applied: usize,
    pub skipped: usize,
}

/// Stateful wrapper around the transition layer for one branch.
pub struct ProjectionEngine {
    state: BranchState,
    stats: ProjectionStats,
}

impl ProjectionEngine {
    /// Start a fold from a copy of `base`. The base itself is never touched.
    pub fn new(base: &BranchState) -> Self {
        Self {
            state: base.clone(),
            stats: ProjectionStats::default(),
        }
    }

    pub fn state(&self) -> &BranchState {
        &self.state
    }

    pub fn stats(&self) -> ProjectionStats {
        self.stats
    }

    /// Apply a single event to the accumulator.
    pub fn apply_event(&mut self, event: &RosterEvent) -> Outcome {
        let outcome = transition_apply(&mut self.state, event);
        match outcome {
            Outcome::Applied => self.stats.applied += 1,
            Outcome::Skipped(_) => self.stats.skipped += 1,
        }
        outcome
    }

    /// Apply an ordered sequence of events, strictly in the given order.
    pub fn apply_sequence(&mut self, events: &[RosterEvent]) -> &BranchState {
        for event in events {
            self.apply_event(event);
        }
        &self.state
    }

    pub fn into_state(self) -> BranchState {
        self.state
    }
}

/// Project `events` over `base` and return the resulting directory.
///
/// An empty event list yields a copy of `base`.
pub fn project(base: &BranchState, events: &[RosterEvent]) -> BranchState {
    let mut engine = ProjectionEngine::new(base);
    engine.apply_sequence(events);
    engine.into_state()
}
