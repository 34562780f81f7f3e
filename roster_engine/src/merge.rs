//! Roster Engine — Log Merger
//!
//! Folds several snapshot sources into one base directory and several log
//! sources into one chronologically sorted event list.
//!
//! A source that could not be acquired is skipped with a warning; it never
//! aborts the merge of the others.

use std::fmt;

use tracing::warn;

use crate::events::RosterEvent;
use crate::state::BranchState;

/// A source that was skipped, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceWarning {
    pub source: String,
    pub message: String,
}

impl SourceWarning {
    /// Record a skipped source and log it.
    pub fn skipped(source: String, error: impl fmt::Display) -> Self {
        let message = error.to_string();
        warn!(source = %source, error = %message, "skipping source that failed to load");
        Self { source, message }
    }
}

impl fmt::Display for SourceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped {}: {}", self.source, self.message)
    }
}

/// A merged value plus the warnings for every skipped source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Merged<T> {
    pub value: T,
    pub warnings: Vec<SourceWarning>,
}

/// Union of base snapshots, later sources overwriting earlier ones
/// record-by-record.
pub fn merge_base_snapshots<I, E>(sources: I) -> Merged<BranchState>
where
    I: IntoIterator<Item = (String, Result<BranchState, E>)>,
    E: fmt::Display,
{
    let mut merged = Merged::<BranchState>::default();
    for (source, loaded) in sources {
        match loaded {
            Ok(snapshot) => merged.value.overwrite_with(snapshot),
            Err(e) => merged.warnings.push(SourceWarning::skipped(source, e)),
        }
    }
    merged
}

/// Concatenate log sources in the given order, then sort by date.
pub fn merge_logs<I, E>(sources: I) -> Merged<Vec<RosterEvent>>
where
    I: IntoIterator<Item = (String, Result<Vec<RosterEvent>, E>)>,
    E: fmt::Display,
{
    let mut merged = Merged::<Vec<RosterEvent>>::default();
    for (source, loaded) in sources {
        match loaded {
            Ok(events) => merged.value.extend(events),
            Err(e) => merged.warnings.push(SourceWarning::skipped(source, e)),
        }
    }
    sort_by_date(&mut merged.value);
    merged
}

/// Ascending date order. Stable: same-date events keep their input order.
pub fn sort_by_date(events: &mut [RosterEvent]) {
    events.sort_by(|a, b| a.date.cmp(&b.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, Member};
    use serde_json::json;

    fn member(name: &str) -> Member {
        Member {
            username: Some(name.to_string()),
            ..Member::default()
        }
    }

    fn snapshot(entries: &[(&str, &str)]) -> BranchState {
        entries
            .iter()
            .map(|(id, name)| (Identity::from(*id), member(name)))
            .collect()
    }

    fn ev(id: &str, date: &str) -> RosterEvent {
        RosterEvent::from_value(&json!({"type": "discharge", "user_id": id, "date": date}))
            .unwrap()
    }

    #[test]
    fn later_snapshots_overwrite_whole_records() {
        let mut richer = member("Ann");
        richer.division = Some("JURY".into());
        let first: BranchState = [(Identity::from("1"), richer)].into_iter().collect();

        let merged = merge_base_snapshots(vec![
            ("jury".to_string(), Ok::<_, String>(first)),
            ("spear".to_string(), Ok(snapshot(&[("1", "Annie"), ("2", "Bo")]))),
        ]);
        assert!(merged.warnings.is_empty());
        assert_eq!(merged.value.len(), 2);
        // Shallow overwrite: the division from the first source is gone.
        assert_eq!(merged.value.get("1"), Some(&member("Annie")));
    }

    #[test]
    fn failed_sources_are_skipped_with_warning() {
        let merged = merge_base_snapshots(vec![
            ("jury".to_string(), Ok(snapshot(&[("1", "Ann")]))),
            ("razor".to_string(), Err("404 not found")),
            ("academy".to_string(), Ok(snapshot(&[("3", "Cy")]))),
        ]);
        assert_eq!(merged.value.len(), 2);
        assert_eq!(
            merged.warnings,
            vec![SourceWarning {
                source: "razor".into(),
                message: "404 not found".into()
            }]
        );
    }

    #[test]
    fn logs_sort_by_date_keeping_same_day_order() {
        let merged = merge_logs(vec![
            (
                "2026_01.json".to_string(),
                Ok::<_, String>(vec![ev("b", "2026-01-02"), ev("c", "2026-01-01")]),
            ),
            ("2025_12.json".to_string(), Ok(vec![ev("a", "2026-01-02")])),
            ("broken.json".to_string(), Err("bad json".to_string())),
        ]);
        let order: Vec<&str> = merged.value.iter().map(|e| e.identity.as_str()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
        assert_eq!(merged.warnings.len(), 1);
    }
}
