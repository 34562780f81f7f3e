//! Roster Engine — Core Domain Types
//!
//! Pure data. No transition logic lives here.
//! Identities are strings everywhere: numeric-looking ids are never
//! parsed as numbers.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder rendered wherever an optional field is absent.
pub const MISSING_FIELD: &str = "n/a";

// ── Branch ─────────────────────────────────────────────────────────

/// One of the two independent organizational hierarchies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Branch {
    #[default]
    #[serde(rename = "CCA")]
    Cca,
    #[serde(rename = "OTA")]
    Ota,
}

impl Branch {
    pub const ALL: [Branch; 2] = [Branch::Cca, Branch::Ota];

    pub fn as_str(self) -> &'static str {
        match self {
            Branch::Cca => "CCA",
            Branch::Ota => "OTA",
        }
    }

    /// Resolve a raw branch tag from a log record.
    ///
    /// Only the exact tag `"OTA"` selects OTA; a missing tag, or any
    /// other value, lands in CCA.
    pub fn from_tag(tag: Option<&str>) -> Branch {
        match tag {
            Some("OTA") => Branch::Ota,
            _ => Branch::Cca,
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Branch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CCA" => Ok(Branch::Cca),
            "OTA" => Ok(Branch::Ota),
            other => Err(format!("unknown branch {:?}, expected CCA or OTA", other)),
        }
    }
}

// ── Identity ───────────────────────────────────────────────────────

/// Opaque, stable member identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read an identity from a raw JSON scalar.
    ///
    /// Strings are taken verbatim. Integers keep their exact decimal
    /// form. Anything else (null, bool, array, object) is no identity.
    pub fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl Borrow<str> for Identity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ── Token ──────────────────────────────────────────────────────────

/// Opaque scalar carried through verbatim (role ids, rank values).
///
/// Never null: a JSON null is read as "absent" before a token is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(Value);

impl Token {
    pub fn from_value(v: &Value) -> Option<Self> {
        if v.is_null() {
            None
        } else {
            Some(Self(v.clone()))
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<i64> for Token {
    fn from(n: i64) -> Self {
        Self(Value::from(n))
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Self(Value::from(s))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

// ── Member ─────────────────────────────────────────────────────────

/// A member record within one branch directory.
///
/// Every field is optional: base snapshots may carry partial records,
/// and an event that names no new value clears the field it replaces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<Token>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_value: Option<Token>,
}

impl Member {
    /// Read a member record leniently.
    ///
    /// Returns `None` only when the record is not an object. A field of
    /// the wrong type is dropped on its own; text fields accept numbers.
    pub fn from_value(v: &Value) -> Option<Self> {
        v.is_object().then(|| Self::from_fields(v))
    }

    /// Member fields of a record, read with the same rules as event fields.
    pub fn from_fields(v: &Value) -> Self {
        Self {
            username: json_text(v, "username"),
            division: json_text(v, "division"),
            role_id: json_token(v, "role_id"),
            rank_name: json_text(v, "rank_name"),
            rank_value: json_token(v, "rank_value"),
        }
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }

    pub fn division(&self) -> &str {
        self.division.as_deref().unwrap_or("")
    }

    pub fn rank_name(&self) -> &str {
        self.rank_name.as_deref().unwrap_or("")
    }
}

// ── Raw field readers ──────────────────────────────────────────────

/// Text field; numbers are accepted in their decimal form.
pub(crate) fn json_text(v: &Value, key: &str) -> Option<String> {
    match v.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn json_token(v: &Value, key: &str) -> Option<Token> {
    v.get(key).and_then(Token::from_value)
}
