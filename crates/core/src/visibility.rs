//! Time-entry visibility scoping.
//!
//! Admins and project managers see every entry. A team leader sees their own
//! entries plus those of every user holding a `member` row in a project where
//! the leader holds a `lead` row. A team member sees only their own entries.
//! Updates and deletes are checked against the same scope.
//!
//! Leadership is taken from `project_team` rows with role `lead` only;
//! `projects.team_leader_id` is not consulted here.

use std::collections::BTreeSet;

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

/// The set of time-entry owners a caller may see and modify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryScope {
    /// No restriction.
    All,
    /// Only entries owned by one of these users.
    Users(BTreeSet<DbId>),
}

impl EntryScope {
    /// Build the scope for a caller.
    ///
    /// `led_member_ids` are the users holding a `member` row in projects the
    /// caller leads. It is ignored for every role except team leader.
    pub fn for_caller<I>(role: Role, caller_id: DbId, led_member_ids: I) -> Self
    where
        I: IntoIterator<Item = DbId>,
    {
        match role {
            Role::Admin | Role::ProjectManager => EntryScope::All,
            Role::TeamLeader => {
                let mut ids: BTreeSet<DbId> = led_member_ids.into_iter().collect();
                ids.insert(caller_id);
                EntryScope::Users(ids)
            }
            Role::TeamMember => EntryScope::Users(BTreeSet::from([caller_id])),
        }
    }

    /// Whether an entry owned by `owner_id` falls inside the scope.
    pub fn permits(&self, owner_id: DbId) -> bool {
        match self {
            EntryScope::All => true,
            EntryScope::Users(ids) => ids.contains(&owner_id),
        }
    }

    /// Reject with [`CoreError::Forbidden`] when `owner_id` is outside the scope.
    pub fn ensure_permits(&self, owner_id: DbId) -> Result<(), CoreError> {
        if self.permits(owner_id) {
            Ok(())
        } else {
            Err(CoreError::Forbidden("Forbidden".into()))
        }
    }

    /// Owner ids for a SQL `user_id = ANY($1)` filter, or `None` for no filter.
    pub fn user_ids(&self) -> Option<Vec<DbId>> {
        match self {
            EntryScope::All => None,
            EntryScope::Users(ids) => Some(ids.iter().copied().collect()),
        }
    }
}

/// Whether building the scope for `role` needs the led-member lookup.
pub fn needs_team_lookup(role: Role) -> bool {
    role == Role::TeamLeader
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn admin_and_manager_are_unrestricted() {
        for role in [Role::Admin, Role::ProjectManager] {
            let scope = EntryScope::for_caller(role, 1, [7, 8]);
            assert_eq!(scope, EntryScope::All);
            assert!(scope.permits(999));
            assert_eq!(scope.user_ids(), None);
        }
    }

    #[test]
    fn team_leader_sees_self_and_led_members() {
        let scope = EntryScope::for_caller(Role::TeamLeader, 1, [2, 3, 3]);
        assert!(scope.permits(1));
        assert!(scope.permits(2));
        assert!(scope.permits(3));
        assert!(!scope.permits(4));
        assert_eq!(scope.user_ids(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn team_leader_without_led_projects_sees_only_self() {
        let scope = EntryScope::for_caller(Role::TeamLeader, 5, std::iter::empty());
        assert_eq!(scope.user_ids(), Some(vec![5]));
    }

    #[test]
    fn team_member_ignores_member_ids() {
        let scope = EntryScope::for_caller(Role::TeamMember, 4, [1, 2]);
        assert_eq!(scope.user_ids(), Some(vec![4]));
        assert!(!scope.permits(1));
    }

    #[test]
    fn ensure_permits_is_forbidden_outside_scope() {
        let scope = EntryScope::for_caller(Role::TeamMember, 4, []);
        assert!(scope.ensure_permits(4).is_ok());
        assert_matches!(scope.ensure_permits(5), Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn only_team_leader_needs_lookup() {
        assert!(needs_team_lookup(Role::TeamLeader));
        assert!(!needs_team_lookup(Role::TeamMember));
        assert!(!needs_team_lookup(Role::Admin));
    }
}
