//! Project vocabularies and team roster construction.

use serde::Serialize;

use crate::enums::define_text_enum;
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

define_text_enum! {
    /// Project lifecycle status.
    #[derive(Default)]
    ProjectStatus("project status") {
        #[default]
        Planning = "planning",
        Active = "active",
        OnHold = "on_hold",
        Completed = "completed",
        Cancelled = "cancelled",
    }
}

define_text_enum! {
    /// How work on a project is billed.
    #[derive(Default)]
    BillingMethod("billing method") {
        #[default]
        Hourly = "hourly",
        Fixed = "fixed",
        PerTransaction = "per_transaction",
    }
}

define_text_enum! {
    /// Sub-role of a user inside a project team.
    TeamRole("team role") {
        Member = "member",
        Lead = "lead",
    }
}

/// One row of a project's team roster, before insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub user_id: DbId,
    pub role: TeamRole,
}

/// Build the full team roster for a project.
///
/// The team leader (if any) gets a `lead` row. Every other listed user gets a
/// `member` row. Duplicate ids and the leader's id are dropped from the member
/// list, so the result never violates the `(project_id, user_id)` uniqueness.
/// Member order follows first appearance.
pub fn build_roster(team_leader_id: Option<DbId>, member_ids: &[DbId]) -> Vec<RosterEntry> {
    let mut roster = Vec::with_capacity(member_ids.len() + 1);

    if let Some(leader) = team_leader_id {
        roster.push(RosterEntry {
            user_id: leader,
            role: TeamRole::Lead,
        });
    }

    for &id in member_ids {
        if roster.iter().any(|e| e.user_id == id) {
            continue;
        }
        roster.push(RosterEntry {
            user_id: id,
            role: TeamRole::Member,
        });
    }

    roster
}

/// Reject a schedule whose end precedes its start.
pub fn validate_schedule(
    start_date: Option<Timestamp>,
    end_date: Option<Timestamp>,
) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            return Err(CoreError::Validation(
                "endDate must not be before startDate".into(),
            ));
        }
    }
    Ok(())
}
