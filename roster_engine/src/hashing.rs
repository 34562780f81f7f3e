//! Roster Engine — Canonical Hashing
//!
//! Deterministic canonical serialization + SHA-256 hashing of a branch
//! directory.
//!
//! Rules:
//!   - Members sorted by identity (UTF-8 byte order)
//!   - Member fields in fixed order, absent fields as null
//!   - UTF-8 JSON, no whitespace, no platform newline

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::domain::Token;
use crate::state::BranchState;
use crate::PROJECTION_VERSION;

/// Canonical serialization of a branch directory to UTF-8 JSON bytes.
pub fn canonical_serialize(state: &BranchState) -> Vec<u8> {
    build_canonical_value(state).to_string().into_bytes()
}

/// SHA-256 of the canonical serialization. Lowercase hex string.
pub fn canonical_hash(state: &BranchState) -> String {
    let digest = Sha256::digest(canonical_serialize(state));
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Field order: projection_version, members.
fn build_canonical_value(state: &BranchState) -> Value {
    // BTreeMap is already sorted by identity
    let members: Vec<Value> = state
        .iter()
        .map(|(id, m)| {
            let mut obj = Map::new();
            obj.insert("identity".to_string(), Value::String(id.to_string()));
            obj.insert("username".to_string(), text(&m.username));
            obj.insert("division".to_string(), text(&m.division));
            obj.insert("role_id".to_string(), token(&m.role_id));
            obj.insert("rank_name".to_string(), text(&m.rank_name));
            obj.insert("rank_value".to_string(), token(&m.rank_value));
            Value::Object(obj)
        })
        .collect();

    let mut root = Map::new();
    root.insert(
        "projection_version".to_string(),
        Value::Number(PROJECTION_VERSION.into()),
    );
    root.insert("members".to_string(), Value::Array(members));
    Value::Object(root)
}

fn text(v: &Option<String>) -> Value {
    v.clone().map_or(Value::Null, Value::String)
}

fn token(v: &Option<Token>) -> Value {
    v.as_ref().map_or(Value::Null, |t| t.as_value().clone())
}
