#![forbid(unsafe_code)]

//! Roster Runtime
//!
//! Acquires base snapshots, event logs and the username history from a
//! data source, hands them to the roster kernel, and reports every source
//! it had to skip.
//!
//! No domain logic lives here — all transitions and views are delegated
//! to the kernel.

pub mod config;
pub mod snapshot_codec;
pub mod source;
pub mod loader;
pub mod replay;
