//! Roster Engine — Branch State
//!
//! A branch directory maps identity to member. CCA and OTA each get
//! their own directory; the two are never merged or cross-referenced.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Branch, Identity, Member};

/// Current-state directory of one branch, keyed by identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchState {
    pub members: BTreeMap<Identity, Member>,
}

impl BranchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identity: &str) -> Option<&Member> {
        self.members.get(identity)
    }

    pub fn get_mut(&mut self, identity: &str) -> Option<&mut Member> {
        self.members.get_mut(identity)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.members.contains_key(identity)
    }

    pub fn insert(&mut self, identity: Identity, member: Member) -> Option<Member> {
        self.members.insert(identity, member)
    }

    pub fn remove(&mut self, identity: &str) -> Option<Member> {
        self.members.remove(identity)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identity, &Member)> {
        self.members.iter()
    }

    /// Shallow union: every record of `other` replaces the record under
    /// the same identity wholesale.
    pub fn overwrite_with(&mut self, other: BranchState) {
        self.members.extend(other.members);
    }
}

impl FromIterator<(Identity, Member)> for BranchState {
    fn from_iter<I: IntoIterator<Item = (Identity, Member)>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

/// One value per branch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByBranch<T> {
    pub cca: T,
    pub ota: T,
}

impl<T> ByBranch<T> {
    pub fn new(cca: T, ota: T) -> Self {
        Self { cca, ota }
    }

    pub fn get(&self, branch: Branch) -> &T {
        match branch {
            Branch::Cca => &self.cca,
            Branch::Ota => &self.ota,
        }
    }

    pub fn get_mut(&mut self, branch: Branch) -> &mut T {
        match branch {
            Branch::Cca => &mut self.cca,
            Branch::Ota => &mut self.ota,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(Branch, T) -> U) -> ByBranch<U> {
        ByBranch {
            cca: f(Branch::Cca, self.cca),
            ota: f(Branch::Ota, self.ota),
        }
    }
}
