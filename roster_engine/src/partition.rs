//! Roster Engine — Branch Partitioner
//!
//! Stable split of the merged stream into one stream per branch.

use crate::events::RosterEvent;
use crate::state::ByBranch;

/// Route every event to its branch, preserving relative order.
/// Events without a branch tag were already read as CCA.
pub fn partition_by_branch(events: Vec<RosterEvent>) -> ByBranch<Vec<RosterEvent>> {
    let mut streams = ByBranch::<Vec<RosterEvent>>::default();
    for event in events {
        streams.get_mut(event.branch).push(event);
    }
    streams
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Branch;
    use serde_json::json;

    #[test]
    fn untagged_events_go_to_cca_in_order() {
        let raw = json!([
            {"type": "enlistment", "user_id": "1"},
            {"type": "enlistment", "user_id": "2", "branch": "OTA"},
            {"type": "enlistment", "user_id": "3", "branch": "CCA"},
            {"type": "enlistment", "user_id": "4", "branch": "OTA"}
        ]);
        let events: Vec<RosterEvent> = raw
            .as_array()
            .unwrap()
            .iter()
            .map(|v| RosterEvent::from_value(v).unwrap())
            .collect();

        let streams = partition_by_branch(events);
        let ids = |b: Branch| -> Vec<String> {
            streams.get(b).iter().map(|e| e.identity.to_string()).collect()
        };
        assert_eq!(ids(Branch::Cca), vec!["1", "3"]);
        assert_eq!(ids(Branch::Ota), vec!["2", "4"]);
    }
}
