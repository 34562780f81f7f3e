#![forbid(unsafe_code)]

//! Roster Engine — deterministic projection of the CCA and OTA rosters.
//!
//! A base snapshot per branch plus an append-only event log fold into the
//! current directory of each branch. Derived views (rank and command
//! groupings, timelines, profiles) read the projected directories.
//!
//! No I/O lives here; acquisition belongs to the runtime.

/// Version of the fold semantics, bound into every canonical hash.
pub const PROJECTION_VERSION: u32 = 1;

pub mod domain;
pub mod events;
pub mod state;
pub mod ranks;
pub mod transitions;
pub mod engine;
pub mod merge;
pub mod partition;
pub mod history;
pub mod views;
pub mod timeline;
pub mod profile;
pub mod hashing;
pub mod roster;
