//! Snapshot Codec — JSON decoding of the roster input documents.
//!
//! Pure codec layer. No file access, no timestamps.
//!
//! - `decode_snapshot`: base snapshot object → BranchState
//! - `decode_log`:      event log array → ordered RosterEvents
//! - `decode_history`:  username history object → IdentityHistory
//! - `encode_snapshot`: BranchState → pretty JSON, same shape as a base file
//!
//! A document with the wrong top-level shape is an error. Individual
//! records that cannot be read are skipped with a warning so the rest of
//! the document still loads.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use roster_engine::domain::{Identity, Member};
use roster_engine::events::RosterEvent;
use roster_engine::history::IdentityHistory;
use roster_engine::state::BranchState;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON {expected} at the top level")]
    Shape { expected: &'static str },
}

// ---------------------------------------------------------------------------
// Decoders
// ---------------------------------------------------------------------------

/// Decode a base snapshot: an object of identity to (partial) member.
///
/// Member fields are read like event fields: numbers stand in for text,
/// and a field of any other type is dropped without losing the record.
pub fn decode_snapshot(json: &str) -> Result<BranchState, CodecError> {
    let doc: Value = serde_json::from_str(json)?;
    let obj = doc.as_object().ok_or(CodecError::Shape { expected: "object" })?;

    let mut state = BranchState::new();
    for (id, record) in obj {
        match Member::from_value(record) {
            Some(member) => {
                state.insert(Identity::from(id.as_str()), member);
            }
            None => warn!(identity = %id, "skipping member record that is not an object"),
        }
    }
    Ok(state)
}

/// Decode an event log: an array of event records, in file order.
pub fn decode_log(json: &str) -> Result<Vec<RosterEvent>, CodecError> {
    let doc: Value = serde_json::from_str(json)?;
    let records = doc.as_array().ok_or(CodecError::Shape { expected: "array" })?;

    let events = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match RosterEvent::from_value(record) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable event record");
                None
            }
        })
        .collect();
    Ok(events)
}

/// Decode the username history document.
pub fn decode_history(json: &str) -> Result<IdentityHistory, CodecError> {
    let doc: Value = serde_json::from_str(json)?;
    IdentityHistory::from_value(&doc).ok_or(CodecError::Shape { expected: "object" })
}

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

/// Encode a branch directory in base-snapshot shape.
///
/// Keys are in identity order; absent member fields are omitted. Decoding
/// the output yields the same directory.
pub fn encode_snapshot(state: &BranchState) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(state)?)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_keeps_partial_records_and_skips_bad_ones() {
        let state = decode_snapshot(
            r#"{
                "1": {"username": "Ann", "division": "JURY", "rank_name": "Recruit", "rank_value": 1},
                "2": {"username": "Bo"},
                "3": "not a member"
            }"#,
        )
        .unwrap();
        assert_eq!(state.len(), 2);
        assert_eq!(state.get("2").unwrap().division, None);
        assert!(!state.contains("3"));
    }

    #[test]
    fn numeric_text_field_keeps_the_member() {
        let state = decode_snapshot(
            r#"{"1": {"username": "Ann", "division": "JURY", "rank_name": 5, "rank_value": true}}"#,
        )
        .unwrap();
        let ann = state.get("1").unwrap();
        assert_eq!(ann.rank_name(), "5");
        assert_eq!(ann.division(), "JURY");
    }

    #[test]
    fn encoded_snapshot_decodes_to_same_state() {
        let state = decode_snapshot(r#"{"10": {"username": "Ann", "role_id": 123456789012345678}}"#)
            .unwrap();
        let again = decode_snapshot(&encode_snapshot(&state).unwrap()).unwrap();
        assert_eq!(state, again);
    }

    #[test]
    fn log_skips_records_without_identity() {
        let events = decode_log(
            r#"[
                {"type": "enlistment", "user_id": 1, "date": "2026-01-01"},
                {"type": "enlistment", "date": "2026-01-02"},
                {"type": "discharge", "user_id": "1", "date": "2026-01-03"}
            ]"#,
        )
        .unwrap();
        let dates: Vec<&str> = events.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-01-01", "2026-01-03"]);
    }

    #[test]
    fn wrong_shapes_are_errors() {
        assert!(matches!(
            decode_log(r#"{"type": "enlistment"}"#),
            Err(CodecError::Shape { expected: "array" })
        ));
        assert!(matches!(
            decode_snapshot("[]"),
            Err(CodecError::Shape { expected: "object" })
        ));
        assert!(matches!(decode_history("{ nope"), Err(CodecError::Json(_))));
    }
}
