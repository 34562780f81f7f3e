//! Roster Engine — Event Timelines
//!
//! Human-readable renderings of event streams: the branch-wide timeline and
//! the per-identity history. Both use the same per-kind templates.

use crate::domain::MISSING_FIELD;
use crate::events::{EventKind, RosterEvent};

/// Render one event as `[date] type - subject` plus a per-kind suffix.
pub fn describe(event: &RosterEvent) -> String {
    let mut text = format!(
        "[{}] {} - {}",
        event.date,
        event.type_name(),
        event.subject()
    );

    match &event.kind {
        EventKind::Enlistment(member) => {
            text.push_str(&format!(
                " joined {} as {}",
                field(&member.division),
                field(&member.rank_name)
            ));
        }
        EventKind::Discharge(d) => {
            text.push_str(&format!(
                " left {} ({})",
                field(&d.division),
                field(&d.old_rank_name)
            ));
        }
        EventKind::Promotion(shift) | EventKind::Demotion(shift) => {
            text.push_str(&format!(
                " in {}: {} -> {}",
                field(&shift.division),
                field(&shift.old_rank_name),
                field(&shift.new_rank_name)
            ));
        }
        EventKind::DivisionTransfer(t) => {
            text.push_str(&format!(
                " moved {} -> {}",
                field(&t.old_division),
                field(&t.new_division)
            ));
            if let Some(rank) = &t.rank_name {
                text.push_str(&format!(" ({})", rank));
            }
        }
        EventKind::UsernameChange(c) => {
            text.push_str(&format!(
                " changed username from {} to {}",
                field(&c.old_username),
                field(&c.new_username)
            ));
        }
        EventKind::RankChange(_) | EventKind::Unknown(_) => {}
    }

    text
}

/// Events of one identity, newest first.
///
/// Same-date events keep their stream order.
pub fn events_for<'a>(events: &'a [RosterEvent], identity: &str) -> Vec<&'a RosterEvent> {
    let mut mine: Vec<&RosterEvent> = events
        .iter()
        .filter(|e| e.identity.as_str() == identity)
        .collect();
    mine.sort_by(|a, b| b.date.cmp(&a.date));
    mine
}

/// Rendered history of one identity, newest first.
pub fn identity_history(events: &[RosterEvent], identity: &str) -> Vec<String> {
    events_for(events, identity)
        .into_iter()
        .map(describe)
        .collect()
}

/// Branch timeline, newest first, optionally narrowed to events whose
/// username, old username or new username contains `search`
/// (case-insensitive).
pub fn branch_timeline(events: &[RosterEvent], search: Option<&str>) -> Vec<String> {
    let needle = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    events
        .iter()
        .rev()
        .filter(|e| match &needle {
            Some(needle) => mentions(e, needle),
            None => true,
        })
        .map(describe)
        .collect()
}

fn mentions(event: &RosterEvent, needle: &str) -> bool {
    [
        &event.names.username,
        &event.names.old_username,
        &event.names.new_username,
    ]
    .into_iter()
    .filter_map(|name| name.as_deref())
    .any(|name| name.to_lowercase().contains(needle))
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING_FIELD)
}
