//! Roster Engine — Event Definitions
//!
//! Events are immutable facts read from the roster logs. They carry the
//! fields of a single transition and contain no transition logic.
//!
//! Raw records are JSON objects with a `type` tag. The tag is turned into
//! a closed [`EventKind`]; tags this kernel does not know become
//! [`EventKind::Unknown`] and are carried along untouched.

use serde_json::Value;
use thiserror::Error;

use crate::domain::{json_text, json_token, Branch, Identity, Member, Token};

/// Reasons a raw record cannot become an event at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("event record is not a JSON object")]
    NotAnObject,
    #[error("event record has no usable user_id")]
    MissingIdentity,
}

/// Rank fields shared by promotions, demotions and plain rank changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankShift {
    pub division: Option<String>,
    pub old_rank_name: Option<String>,
    pub old_rank_value: Option<Token>,
    pub new_rank_name: Option<String>,
    pub new_rank_value: Option<Token>,
    pub new_role_id: Option<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Discharge {
    pub division: Option<String>,
    pub old_rank_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DivisionTransfer {
    pub old_division: Option<String>,
    pub new_division: Option<String>,
    pub rank_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsernameChange {
    pub old_username: Option<String>,
    pub new_username: Option<String>,
}

/// The closed set of transitions, plus a carrier for unrecognised tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Carries the complete member record to install.
    Enlistment(Member),
    Discharge(Discharge),
    Promotion(RankShift),
    Demotion(RankShift),
    RankChange(RankShift),
    DivisionTransfer(DivisionTransfer),
    UsernameChange(UsernameChange),
    Unknown(String),
}

impl EventKind {
    /// The wire tag of this kind.
    pub fn type_name(&self) -> &str {
        match self {
            EventKind::Enlistment(_) => "enlistment",
            EventKind::Discharge(_) => "discharge",
            EventKind::Promotion(_) => "promotion",
            EventKind::Demotion(_) => "demotion",
            EventKind::RankChange(_) => "rank_change",
            EventKind::DivisionTransfer(_) => "division_transfer",
            EventKind::UsernameChange(_) => "username_change",
            EventKind::Unknown(tag) => tag,
        }
    }
}

/// Name fields every record may carry, whatever its kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventNames {
    pub username: Option<String>,
    pub old_username: Option<String>,
    pub new_username: Option<String>,
}

/// A single roster event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEvent {
    pub identity: Identity,
    pub branch: Branch,
    /// Lexicographically sortable date; empty when the record has none.
    pub date: String,
    pub names: EventNames,
    pub kind: EventKind,
}

impl RosterEvent {
    /// Parse a raw log record.
    ///
    /// Only the record shape and `user_id` are mandatory. Every other
    /// field is optional; a missing `branch` means CCA.
    pub fn from_value(v: &Value) -> Result<Self, EventError> {
        if !v.is_object() {
            return Err(EventError::NotAnObject);
        }
        let identity = v
            .get("user_id")
            .and_then(Identity::from_value)
            .ok_or(EventError::MissingIdentity)?;

        let names = EventNames {
            username: json_text(v, "username"),
            old_username: json_text(v, "old_username"),
            new_username: json_text(v, "new_username").or_else(|| json_text(v, "newUsername")),
        };

        let etype = v.get("type").and_then(Value::as_str).unwrap_or("");
        let kind = match etype {
            "enlistment" => EventKind::Enlistment(Member::from_fields(v)),
            "discharge" => EventKind::Discharge(Discharge {
                division: json_text(v, "division"),
                old_rank_name: json_text(v, "old_rank_name"),
            }),
            "promotion" => EventKind::Promotion(rank_shift(v)),
            "demotion" => EventKind::Demotion(rank_shift(v)),
            "rank_change" => EventKind::RankChange(rank_shift(v)),
            "division_transfer" => EventKind::DivisionTransfer(DivisionTransfer {
                old_division: json_text(v, "old_division"),
                new_division: json_text(v, "new_division"),
                rank_name: json_text(v, "rank_name"),
            }),
            "username_change" => EventKind::UsernameChange(UsernameChange {
                old_username: names.old_username.clone(),
                new_username: names.new_username.clone(),
            }),
            other => EventKind::Unknown(other.to_string()),
        };

        Ok(Self {
            identity,
            branch: Branch::from_tag(v.get("branch").and_then(Value::as_str)),
            date: json_text(v, "date").unwrap_or_default(),
            names,
            kind,
        })
    }

    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    /// The name an event is shown under: the new username first, then the
    /// plain username, then the old one. Empty names are skipped.
    pub fn subject(&self) -> &str {
        [
            &self.names.new_username,
            &self.names.username,
            &self.names.old_username,
        ]
        .into_iter()
        .filter_map(|name| name.as_deref())
        .find(|name| !name.is_empty())
        .unwrap_or("Unknown")
    }
}

// ---------------------------------------------------------------------------
// Helper: extract JSON fields
// ---------------------------------------------------------------------------

fn rank_shift(v: &Value) -> RankShift {
    RankShift {
        division: json_text(v, "division"),
        old_rank_name: json_text(v, "old_rank_name"),
        old_rank_value: json_token(v, "old_rank_value"),
        new_rank_name: json_text(v, "new_rank_name"),
        new_rank_value: json_token(v, "new_rank_value"),
        new_role_id: json_token(v, "new_role_id"),
    }
}
