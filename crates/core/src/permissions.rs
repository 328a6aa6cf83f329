//! Route permission table.
//!
//! Every guarded operation is an [`Action`]; [`allowed_roles`] is the single
//! place that says which roles may perform it. Handlers call [`authorize`]
//! before touching the database.

use crate::error::CoreError;
use crate::roles::Role;

/// Operations exposed by the HTTP surface that carry a role requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Users
    ListUsers,
    ListAllUsers,
    ViewUser,
    CreateUser,
    UpdateUser,
    DeleteUser,
    ViewOwnProfile,

    // Projects
    ListProjects,
    ViewProject,
    CreateProject,
    UpdateProject,
    DeleteProject,

    // Tasks
    ListTasks,
    ViewTask,
    ViewOwnTasks,
    ViewProjectTasks,
    CreateTask,
    UpdateTask,
    DeleteTask,

    // Time entries (row-level scoping applies on top)
    ListTimeEntries,
    CreateTimeEntry,
    UpdateTimeEntry,
    DeleteTimeEntry,

    // Dashboard
    ViewDashboard,
}

const EVERYONE: &[Role] = Role::ALL;
const ADMIN_ONLY: &[Role] = &[Role::Admin];
const STAFF: &[Role] = &[Role::Admin, Role::ProjectManager, Role::TeamLeader];

/// The roles allowed to perform `action`.
pub fn allowed_roles(action: Action) -> &'static [Role] {
    use Action::*;

    match action {
        ListUsers => STAFF,
        ListAllUsers | ViewUser | CreateUser | UpdateUser | DeleteUser => ADMIN_ONLY,
        ViewOwnProfile => EVERYONE,

        ListProjects | ViewProject => EVERYONE,
        CreateProject | UpdateProject | DeleteProject => STAFF,

        ListTasks | CreateTask | DeleteTask => STAFF,
        ViewTask | ViewOwnTasks | ViewProjectTasks | UpdateTask => EVERYONE,

        ListTimeEntries | CreateTimeEntry | UpdateTimeEntry | DeleteTimeEntry => EVERYONE,

        ViewDashboard => EVERYONE,
    }
}

/// Whether `role` may perform `action`.
pub fn is_permitted(role: Role, action: Action) -> bool {
    allowed_roles(action).contains(&role)
}

/// Reject with [`CoreError::Forbidden`] unless `role` may perform `action`.
pub fn authorize(role: Role, action: Action) -> Result<(), CoreError> {
    if is_permitted(role, action) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Access denied. Insufficient permissions.".into(),
        ))
    }
}
