//! Roster Engine — Member Search and Profiles

use serde::Serialize;

use crate::domain::{Branch, Identity, Member, MISSING_FIELD};
use crate::events::RosterEvent;
use crate::history::IdentityHistory;
use crate::ranks::{is_high_command, ACADEMY_DIVISION};
use crate::state::BranchState;
use crate::timeline::identity_history;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub identity: Identity,
    pub display_name: String,
    pub division: String,
    pub rank_name: String,
    /// `"{display} - {division} - {rank}"`
    pub label: String,
}

/// Members whose projected username contains `term`, case-insensitive.
/// A blank term matches nothing.
pub fn search_members(state: &BranchState, history: &IdentityHistory, term: &str) -> Vec<SearchHit> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    state
        .iter()
        .filter(|(_, m)| m.username().to_lowercase().contains(&needle))
        .map(|(id, m)| {
            let display_name = history
                .resolve_display_name(id.as_str(), m.username())
                .to_string();
            let division = m.division.clone().unwrap_or_else(|| MISSING_FIELD.to_string());
            let rank_name = m.rank_name.clone().unwrap_or_else(|| MISSING_FIELD.to_string());
            SearchHit {
                identity: id.clone(),
                label: format!("{} - {} - {}", display_name, division, rank_name),
                display_name,
                division,
                rank_name,
            }
        })
        .collect()
}

/// Current standing of an enlisted member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberCard {
    pub display_name: String,
    pub division_label: String,
    pub rank_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub identity: Identity,
    /// `None` when the identity is not in the projected directory.
    pub member: Option<MemberCard>,
    /// Past usernames, oldest first, joined for display.
    pub past_usernames: Option<String>,
    /// Rendered event history, newest first.
    pub events: Vec<String>,
}

/// Division as shown on a profile.
///
/// On CCA, high-command ranks read "High Command" and academy members
/// read "UNION (Academy)"; everything else shows the raw tag.
pub fn division_label(branch: Branch, member: &Member) -> String {
    if branch == Branch::Cca {
        if is_high_command(member.rank_name()) {
            return "High Command".to_string();
        }
        if member.division() == ACADEMY_DIVISION {
            return "UNION (Academy)".to_string();
        }
    }
    member
        .division
        .clone()
        .unwrap_or_else(|| MISSING_FIELD.to_string())
}

pub fn build_profile(
    state: &BranchState,
    events: &[RosterEvent],
    history: &IdentityHistory,
    branch: Branch,
    identity: &str,
) -> Profile {
    let member = state.get(identity).map(|m| MemberCard {
        display_name: history
            .resolve_display_name(identity, m.username())
            .to_string(),
        division_label: division_label(branch, m),
        rank_name: m
            .rank_name
            .clone()
            .unwrap_or_else(|| MISSING_FIELD.to_string()),
    });

    Profile {
        identity: Identity::from(identity),
        member,
        past_usernames: history.chain(identity),
        events: identity_history(events, identity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state() -> BranchState {
        serde_json::from_value(json!({
            "1": {"username": "Ann", "division": "ACADEMY", "rank_name": "Senior Instructor"},
            "2": {"username": "Hannah", "division": "JURY", "rank_name": "Recruit"},
            "3": {"username": "Boss", "division": "ACADEMY", "rank_name": "Field Commander"}
        }))
        .unwrap()
    }

    #[test]
    fn search_matches_projected_username_shows_overlay() {
        let history = IdentityHistory::from_value(&json!({"2": ["Hannah", "Jo"]})).unwrap();
        let hits = search_members(&state(), &history, " ANN ");
        let labels: Vec<&str> = hits.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Ann - ACADEMY - Senior Instructor", "Jo - JURY - Recruit"]
        );
        assert!(search_members(&state(), &history, "  ").is_empty());
    }

    #[test]
    fn division_labels_for_academy_and_high_command() {
        let s = state();
        assert_eq!(division_label(Branch::Cca, s.get("1").unwrap()), "UNION (Academy)");
        assert_eq!(division_label(Branch::Cca, s.get("3").unwrap()), "High Command");
        assert_eq!(division_label(Branch::Ota, s.get("1").unwrap()), "ACADEMY");
        assert_eq!(division_label(Branch::Cca, s.get("2").unwrap()), "JURY");
    }

    #[test]
    fn profile_of_unknown_identity_still_lists_events() {
        let events = vec![RosterEvent::from_value(&json!({
            "type": "discharge", "user_id": "9", "date": "2026-01-01", "username": "Gone"
        }))
        .unwrap()];
        let history = IdentityHistory::from_value(&json!({"9": ["Old", "Gone"]})).unwrap();
        let profile = build_profile(&state(), &events, &history, Branch::Cca, "9");
        assert_eq!(profile.member, None);
        assert_eq!(profile.past_usernames.as_deref(), Some("Old \u{2192} Gone"));
        assert_eq!(profile.events, vec!["[2026-01-01] discharge - Gone left n/a (n/a)"]);
    }
}
