//! Roster Engine — Identity History Overlay
//!
//! Past display names per identity, oldest first, sourced independently of
//! the event log. The newest name overrides the projected username at query
//! time; projected state is never rewritten.
//!
//! `username_change` events and this overlay are separate stores and may
//! disagree. When they do, the overlay wins.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::Identity;

/// Separator used when showing a name chain.
pub const CHAIN_SEPARATOR: &str = " \u{2192} ";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentityHistory {
    names: BTreeMap<Identity, Vec<String>>,
}

impl IdentityHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a history document: an object of identity to name list.
    ///
    /// Returns `None` when the document is not an object. Entries whose
    /// value is not a list are dropped, as are non-string names.
    pub fn from_value(v: &Value) -> Option<Self> {
        let obj = v.as_object()?;
        let names = obj
            .iter()
            .filter_map(|(id, list)| {
                let list = list
                    .as_array()?
                    .iter()
                    .filter_map(|n| n.as_str().map(str::to_string))
                    .collect();
                Some((Identity::from(id.as_str()), list))
            })
            .collect();
        Some(Self { names })
    }

    pub fn insert(&mut self, identity: Identity, names: Vec<String>) {
        self.names.insert(identity, names);
    }

    pub fn names(&self, identity: &str) -> Option<&[String]> {
        self.names.get(identity).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Newest recorded name for `identity`, or `fallback` when the identity
    /// has no recorded names. A recorded empty name is returned as is.
    pub fn resolve_display_name<'a>(&'a self, identity: &str, fallback: &'a str) -> &'a str {
        self.names(identity)
            .and_then(<[String]>::last)
            .map_or(fallback, String::as_str)
    }

    /// All recorded names joined oldest to newest, if any.
    pub fn chain(&self, identity: &str) -> Option<String> {
        self.names(identity)
            .filter(|names| !names.is_empty())
            .map(|names| names.join(CHAIN_SEPARATOR))
    }
}
