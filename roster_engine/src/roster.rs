//! Roster Engine — Roster Context
//!
//! Top-level orchestrator. Holds the projected directory and event stream
//! of both branches plus the identity-history overlay, and answers every
//! query against them. A `Roster` only exists once its inputs are fully
//! loaded; there is no half-built state.

use tracing::info;

use crate::domain::Branch;
use crate::engine::ProjectionEngine;
use crate::events::RosterEvent;
use crate::hashing::canonical_hash;
use crate::history::IdentityHistory;
use crate::merge::sort_by_date;
use crate::partition::partition_by_branch;
use crate::profile::{build_profile, search_members, Profile, SearchHit};
use crate::state::{BranchState, ByBranch};
use crate::timeline::{branch_timeline, identity_history};
use crate::views::{command_grouping, rank_grouping, unit_view, UnitView};

pub struct Roster {
    states: ByBranch<BranchState>,
    events: ByBranch<Vec<RosterEvent>>,
    history: IdentityHistory,
}

impl Roster {
    /// Sort, partition and project.
    ///
    /// `events` may come from any number of logs in any order; they are
    /// sorted by date (stable) before being split per branch. Each branch
    /// is folded over its own base snapshot.
    pub fn build(
        base: ByBranch<BranchState>,
        mut events: Vec<RosterEvent>,
        history: IdentityHistory,
    ) -> Self {
        sort_by_date(&mut events);
        let streams = partition_by_branch(events);

        let states = base.map(|branch, base| {
            let mut engine = ProjectionEngine::new(&base);
            engine.apply_sequence(streams.get(branch));
            let stats = engine.stats();
            info!(
                branch = %branch,
                members = engine.state().len(),
                events = streams.get(branch).len(),
                applied = stats.applied,
                skipped = stats.skipped,
                "projected branch"
            );
            engine.into_state()
        });

        Self {
            states,
            events: streams,
            history,
        }
    }

    pub fn state(&self, branch: Branch) -> &BranchState {
        self.states.get(branch)
    }

    /// The branch's replayed events, oldest first.
    pub fn events(&self, branch: Branch) -> &[RosterEvent] {
        self.events.get(branch)
    }

    pub fn history(&self) -> &IdentityHistory {
        &self.history
    }

    /// Overlay name for `identity`, or `fallback` when it has none.
    pub fn display_name<'a>(&'a self, identity: &str, fallback: &'a str) -> &'a str {
        self.history.resolve_display_name(identity, fallback)
    }

    pub fn unit_view(&self, branch: Branch, unit: &str) -> UnitView {
        unit_view(self.state(branch), branch, unit, &self.history)
    }

    pub fn rank_grouping(&self, branch: Branch, unit: &str) -> UnitView {
        rank_grouping(self.state(branch), branch, unit, &self.history)
    }

    pub fn command_grouping(&self, branch: Branch) -> UnitView {
        command_grouping(self.state(branch), branch, &self.history)
    }

    pub fn identity_history(&self, branch: Branch, identity: &str) -> Vec<String> {
        identity_history(self.events(branch), identity)
    }

    pub fn timeline(&self, branch: Branch, search: Option<&str>) -> Vec<String> {
        branch_timeline(self.events(branch), search)
    }

    pub fn search(&self, branch: Branch, term: &str) -> Vec<SearchHit> {
        search_members(self.state(branch), &self.history, term)
    }

    pub fn profile(&self, branch: Branch, identity: &str) -> Profile {
        build_profile(
            self.state(branch),
            self.events(branch),
            &self.history,
            branch,
            identity,
        )
    }

    pub fn state_hash(&self, branch: Branch) -> String {
        canonical_hash(self.state(branch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn events(raw: serde_json::Value) -> Vec<RosterEvent> {
        raw.as_array()
            .unwrap()
            .iter()
            .map(|v| RosterEvent::from_value(v).unwrap())
            .collect()
    }

    #[test]
    fn branches_are_projected_independently() {
        let base = ByBranch::new(
            serde_json::from_value(json!({
                "1": {"username": "Ann", "division": "JURY", "rank_name": "Recruit", "rank_value": 1}
            }))
            .unwrap(),
            BranchState::new(),
        );
        let roster = Roster::build(
            base,
            events(json!([
                {"type": "promotion", "user_id": "1", "date": "2026-01-01",
                 "new_rank_name": "Field Officer", "new_rank_value": 5},
                {"type": "enlistment", "user_id": "1", "date": "2025-12-01", "branch": "OTA",
                 "username": "Ann", "division": "ECHO", "rank_name": "Tier III"}
            ])),
            IdentityHistory::new(),
        );

        assert_eq!(roster.state(Branch::Cca).get("1").unwrap().rank_name(), "Field Officer");
        assert_eq!(roster.state(Branch::Ota).get("1").unwrap().division(), "ECHO");
        assert_eq!(roster.events(Branch::Cca).len(), 1);
        assert_eq!(roster.events(Branch::Ota).len(), 1);
    }

    #[test]
    fn same_date_events_replay_in_input_order() {
        let roster = Roster::build(
            ByBranch::default(),
            events(json!([
                {"type": "enlistment", "user_id": "1", "date": "2026-01-02", "username": "Late"},
                {"type": "enlistment", "user_id": "1", "date": "2026-01-01", "username": "Ann"},
                {"type": "discharge", "user_id": "1", "date": "2026-01-01"}
            ])),
            IdentityHistory::new(),
        );
        // Enlist then discharge on 01-01, re-enlist on 01-02.
        assert_eq!(roster.state(Branch::Cca).get("1").unwrap().username(), "Late");
    }
}
