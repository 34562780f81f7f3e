//! Roster Engine — Centralized Transition Logic
//!
//! ALL state-mutation logic lives here.
//! Every reference to a missing member is a guarded no-op; no transition
//! ever fails or panics, whatever the event carries.

use tracing::debug;

use crate::domain::{Branch, Identity};
use crate::events::{DivisionTransfer, EventKind, RankShift, RosterEvent, UsernameChange};
use crate::ranks::ACADEMY_DIVISION;
use crate::state::BranchState;

/// Why an event left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The event names an identity that is not enlisted.
    MissingMember,
    /// A CCA transfer targeted a member of the reserved academy cohort.
    AcademyGuard,
    /// The event type is not one this kernel applies.
    UnknownKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Skipped(SkipReason),
}

// ---------------------------------------------------------------------------
// Public dispatcher
// ---------------------------------------------------------------------------

/// Apply *event* to *state* in place.
pub fn apply_event(state: &mut BranchState, event: &RosterEvent) -> Outcome {
    let id = &event.identity;

    let outcome = match &event.kind {
        EventKind::Enlistment(member) => {
            state.insert(id.clone(), member.clone());
            Outcome::Applied
        }
        EventKind::Discharge(_) => match state.remove(id.as_str()) {
            Some(_) => Outcome::Applied,
            None => Outcome::Skipped(SkipReason::MissingMember),
        },
        EventKind::Promotion(shift)
        | EventKind::Demotion(shift)
        | EventKind::RankChange(shift) => apply_rank_shift(state, id, shift),
        EventKind::DivisionTransfer(transfer) => {
            apply_division_transfer(state, id, event.branch, transfer)
        }
        EventKind::UsernameChange(change) => apply_username_change(state, id, change),
        EventKind::Unknown(_) => Outcome::Skipped(SkipReason::UnknownKind),
    };

    if let Outcome::Skipped(reason) = outcome {
        debug!(
            identity = %id,
            branch = %event.branch,
            event_type = event.type_name(),
            date = %event.date,
            ?reason,
            "event left state unchanged"
        );
    }

    outcome
}

// ---------------------------------------------------------------------------
// Individual transition handlers (private)
// ---------------------------------------------------------------------------

fn apply_rank_shift(state: &mut BranchState, id: &Identity, shift: &RankShift) -> Outcome {
    let Some(member) = state.get_mut(id.as_str()) else {
        return Outcome::Skipped(SkipReason::MissingMember);
    };

    member.rank_name = shift.new_rank_name.clone();
    member.rank_value = shift.new_rank_value.clone();
    if let Some(role_id) = &shift.new_role_id {
        member.role_id = Some(role_id.clone());
    }

    Outcome::Applied
}

fn apply_division_transfer(
    state: &mut BranchState,
    id: &Identity,
    branch: Branch,
    transfer: &DivisionTransfer,
) -> Outcome {
    let Some(member) = state.get_mut(id.as_str()) else {
        return Outcome::Skipped(SkipReason::MissingMember);
    };

    // Academy members only move through a base snapshot edit.
    if branch == Branch::Cca && member.division.as_deref() == Some(ACADEMY_DIVISION) {
        return Outcome::Skipped(SkipReason::AcademyGuard);
    }

    member.division = transfer.new_division.clone();
    Outcome::Applied
}

fn apply_username_change(
    state: &mut BranchState,
    id: &Identity,
    change: &UsernameChange,
) -> Outcome {
    let Some(member) = state.get_mut(id.as_str()) else {
        return Outcome::Skipped(SkipReason::MissingMember);
    };

    member.username = change.new_username.clone();
    Outcome::Applied
}
