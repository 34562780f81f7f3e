//! Roster Engine — Unit and Rank Catalogue
//!
//! Fixed per-branch orderings consumed by the derived views, highest
//! rank first.

use crate::domain::Branch;

/// Reserved CCA cohort that division transfers can never relocate.
pub const ACADEMY_DIVISION: &str = "ACADEMY";

/// Pseudo-unit that selects the command grouping.
pub const COMMAND_UNIT: &str = "COMMAND";

pub const CCA_DIVISIONS: [&str; 5] = ["JURY", "SPEAR", "RAZOR", "ACADEMY", COMMAND_UNIT];

pub const OTA_VARIANTS: [&str; 6] = ["ECHO", "RANGER", "DAGGER", "PHANTOM", "KING", COMMAND_UNIT];

pub const CCA_RANK_ORDER: [&str; 13] = [
    "Division Leader",
    "Head Instructor",
    "Squadron Leader",
    "Deputy Instructor",
    "Field Officer",
    "Senior Instructor",
    "Elite Protection Unit",
    "D1 Protection Unit",
    "D2 Protection Unit",
    "D3 Protection Unit",
    "D4 Protection Unit",
    "D5 Protection Unit",
    "Recruit",
];

pub const OTA_TIER_ORDER: [&str; 3] = ["Tier I", "Tier II", "Tier III"];

pub const CCA_COMMAND_ORDER: [&str; 8] = [
    "Earth Administrator",
    "Sectorial Commander",
    "Field Commander",
    "Adjutant Commander",
    "Division Leader",
    "Squadron Leader",
    "Field Officer",
    "Elite Protection Unit",
];

pub const OTA_COMMAND_ORDER: [&str; 6] = [
    "Earth Administrator",
    "Sectorial Commander",
    "Overwatch Commander",
    "Overwatch Captain",
    "Overwatch Officer",
    "Overwatch Leader",
];

/// CCA ranks that sit above the divisions; labelled without one.
pub const CCA_HIGH_COMMAND_RANKS: [&str; 4] = [
    "Adjutant Commander",
    "Field Commander",
    "Sectorial Commander",
    "Earth Administrator",
];

/// Academy instructor ranks and the command-track rank each counts as.
pub const INSTRUCTOR_ALIASES: [(&str, &str); 3] = [
    ("Senior Instructor", "Field Officer"),
    ("Deputy Instructor", "Squadron Leader"),
    ("Head Instructor", "Division Leader"),
];

/// Units selectable for a branch, in display order.
pub fn units(branch: Branch) -> &'static [&'static str] {
    match branch {
        Branch::Cca => &CCA_DIVISIONS,
        Branch::Ota => &OTA_VARIANTS,
    }
}

/// Rank order used when grouping a single unit.
pub fn rank_order(branch: Branch) -> &'static [&'static str] {
    match branch {
        Branch::Cca => &CCA_RANK_ORDER,
        Branch::Ota => &OTA_TIER_ORDER,
    }
}

pub fn command_order(branch: Branch) -> &'static [&'static str] {
    match branch {
        Branch::Cca => &CCA_COMMAND_ORDER,
        Branch::Ota => &OTA_COMMAND_ORDER,
    }
}

/// Command-track rank for a raw CCA rank. Ranks without an alias map to
/// themselves.
pub fn command_alias(rank: &str) -> &str {
    INSTRUCTOR_ALIASES
        .iter()
        .find(|(from, _)| *from == rank)
        .map_or(rank, |(_, to)| *to)
}

pub fn is_high_command(rank: &str) -> bool {
    CCA_HIGH_COMMAND_RANKS.contains(&rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructor_ranks_alias_to_command_track() {
        assert_eq!(command_alias("Senior Instructor"), "Field Officer");
        assert_eq!(command_alias("Deputy Instructor"), "Squadron Leader");
        assert_eq!(command_alias("Head Instructor"), "Division Leader");
        assert_eq!(command_alias("Recruit"), "Recruit");
        for (_, to) in INSTRUCTOR_ALIASES {
            assert!(CCA_COMMAND_ORDER.contains(&to));
        }
    }

    #[test]
    fn every_branch_offers_the_command_unit() {
        for branch in Branch::ALL {
            assert_eq!(units(branch).last(), Some(&COMMAND_UNIT));
        }
    }
}
