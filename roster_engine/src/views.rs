//! Roster Engine — Derived Views
//!
//! Read-only groupings over a projected branch directory:
//!   - rank grouping of a single unit, ranks in the branch's fixed order
//!   - command grouping across all units, with instructor aliasing on CCA
//!
//! Display names go through the identity-history overlay. Output order is
//! fully determined by the inputs.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Branch, Identity, Member, MISSING_FIELD};
use crate::history::IdentityHistory;
use crate::ranks::{command_alias, command_order, is_high_command, rank_order, COMMAND_UNIT};
use crate::state::BranchState;

/// One listed member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewEntry {
    pub identity: Identity,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankGroup {
    pub rank: String,
    pub entries: Vec<ViewEntry>,
}

/// Result of a unit or command query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum UnitView {
    /// No member carries the requested unit tag.
    NoMembers { unit: String },
    /// No member holds a command-tier rank anywhere in the branch.
    NoCommandUnits,
    /// Rank groups in display order; may be empty when every member of the
    /// unit holds an unlisted rank.
    Ranks { groups: Vec<RankGroup> },
}

impl UnitView {
    pub fn groups(&self) -> &[RankGroup] {
        match self {
            UnitView::Ranks { groups } => groups.as_slice(),
            _ => &[],
        }
    }
}

/// Unit view for `unit`; the `COMMAND` pseudo-unit selects the command
/// grouping.
pub fn unit_view(
    state: &BranchState,
    branch: Branch,
    unit: &str,
    history: &IdentityHistory,
) -> UnitView {
    if unit == COMMAND_UNIT {
        command_grouping(state, branch, history)
    } else {
        rank_grouping(state, branch, unit, history)
    }
}

/// Members of `unit`, grouped by rank and sorted by display name.
/// Ranks outside the branch's rank order are left out.
pub fn rank_grouping(
    state: &BranchState,
    branch: Branch,
    unit: &str,
    history: &IdentityHistory,
) -> UnitView {
    let mut by_rank: BTreeMap<&str, Vec<ViewEntry>> = BTreeMap::new();
    let mut found = false;

    for (id, member) in state
        .iter()
        .filter(|(_, m)| m.division.as_deref() == Some(unit))
    {
        found = true;
        by_rank.entry(member.rank_name()).or_default().push(ViewEntry {
            identity: id.clone(),
            label: display_name(history, id, member).to_string(),
        });
    }

    if !found {
        return UnitView::NoMembers {
            unit: unit.to_string(),
        };
    }

    UnitView::Ranks {
        groups: ordered_groups(by_rank, rank_order(branch)),
    }
}

/// Command-tier members across every unit of the branch.
pub fn command_grouping(state: &BranchState, branch: Branch, history: &IdentityHistory) -> UnitView {
    let order = command_order(branch);
    let mut by_rank: BTreeMap<&str, Vec<ViewEntry>> = BTreeMap::new();

    for (id, member) in state.iter() {
        let raw_rank = member.rank_name();
        let effective = match branch {
            Branch::Cca => command_alias(raw_rank),
            Branch::Ota => raw_rank,
        };
        if !order.contains(&effective) {
            continue;
        }

        let name = display_name(history, id, member);
        let label = match branch {
            Branch::Cca if !is_high_command(raw_rank) => format!(
                "{} ({})",
                name,
                member.division.as_deref().unwrap_or(MISSING_FIELD)
            ),
            _ => name.to_string(),
        };
        by_rank.entry(effective).or_default().push(ViewEntry {
            identity: id.clone(),
            label,
        });
    }

    if by_rank.is_empty() {
        return UnitView::NoCommandUnits;
    }

    UnitView::Ranks {
        groups: ordered_groups(by_rank, order),
    }
}

/// Case-insensitive order, ties broken by the raw text.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn display_name<'a>(history: &'a IdentityHistory, id: &Identity, member: &'a Member) -> &'a str {
    history.resolve_display_name(id.as_str(), member.username())
}

fn ordered_groups<'a>(
    mut by_rank: BTreeMap<&'a str, Vec<ViewEntry>>,
    order: &[&'a str],
) -> Vec<RankGroup> {
    order
        .iter()
        .filter_map(|rank| {
            let mut entries = by_rank.remove(rank)?;
            entries.sort_by(|a, b| {
                collate(&a.label, &b.label).then_with(|| a.identity.cmp(&b.identity))
            });
            Some(RankGroup {
                rank: rank.to_string(),
                entries,
            })
        })
        .collect()
}
