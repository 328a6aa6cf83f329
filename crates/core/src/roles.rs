//! Account roles.
//!
//! The string values must match the `chk_users_role` constraint in
//! `20250101000001_create_users.sql`.

use crate::enums::define_text_enum;

define_text_enum! {
    /// Role of a user account. Gates route access and time-entry visibility.
    #[derive(Default)]
    Role("role") {
        Admin = "admin",
        ProjectManager = "project_manager",
        TeamLeader = "team_leader",
        #[default]
        TeamMember = "team_member",
    }
}

impl Role {
    /// Roles a caller may pick for themselves through `POST /auth/register`.
    pub const SELF_REGISTRABLE: &'static [Role] =
        &[Role::Admin, Role::ProjectManager, Role::TeamMember];

    /// Whether this role sees every time entry without team scoping.
    pub fn sees_all_time_entries(self) -> bool {
        matches!(self, Role::Admin | Role::ProjectManager)
    }

    /// Whether a fresh account may register itself with this role.
    pub fn is_self_registrable(self) -> bool {
        Self::SELF_REGISTRABLE.contains(&self)
    }
}
