//! Load pipeline — acquire every input, skip what fails, build the roster.
//!
//! Order of work:
//!   1. base snapshots per branch, merged in configured order
//!   2. log names, then each log, concatenated and date-sorted
//!   3. username history
//!   4. partition + projection (kernel)
//!
//! No acquisition failure is fatal. Each one becomes a warning in the
//! report and the load carries on with whatever was obtained.

use tracing::info;

use roster_engine::domain::Branch;
use roster_engine::history::IdentityHistory;
use roster_engine::merge::{merge_base_snapshots, merge_logs, SourceWarning};
use roster_engine::roster::Roster;
use roster_engine::state::ByBranch;

use crate::config::RosterConfig;
use crate::source::DataSource;

/// A fully built roster plus every source that had to be skipped.
pub struct LoadReport {
    pub roster: Roster,
    pub warnings: Vec<SourceWarning>,
}

pub fn load_roster(source: &dyn DataSource, config: &RosterConfig) -> LoadReport {
    let mut warnings = Vec::new();

    // -- Base snapshots --
    let base = ByBranch::new(
        config.base_snapshots(Branch::Cca),
        config.base_snapshots(Branch::Ota),
    )
    .map(|branch, names| {
        let merged = merge_base_snapshots(names.iter().map(|name| {
            (
                format!("{} base snapshot {:?}", branch, name),
                source.base_snapshot(name),
            )
        }));
        warnings.extend(merged.warnings);
        merged.value
    });

    // -- Logs --
    let log_names = source.log_names().unwrap_or_else(|e| {
        warnings.push(SourceWarning::skipped("log listing".to_string(), e));
        Vec::new()
    });
    let merged = merge_logs(
        log_names
            .iter()
            .map(|name| (format!("log {:?}", name), source.log(name))),
    );
    warnings.extend(merged.warnings);
    let events = merged.value;

    // -- Username history --
    let history = source.identity_history().unwrap_or_else(|e| {
        warnings.push(SourceWarning::skipped("username history".to_string(), e));
        IdentityHistory::new()
    });

    let event_count = events.len();
    let roster = Roster::build(base, events, history);

    info!(
        logs = log_names.len(),
        events = event_count,
        cca_members = roster.state(Branch::Cca).len(),
        ota_members = roster.state(Branch::Ota).len(),
        warnings = warnings.len(),
        "roster loaded"
    );

    LoadReport { roster, warnings }
}
