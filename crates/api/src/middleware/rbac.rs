//! Role-based access control.
//!
//! Handlers extract an [`AuthUser`] and call [`AuthUser::require`] with the
//! [`Action`] they perform before touching the database. Handlers that also
//! take a JSON body use the [`Require`] extractor instead, so the role check
//! runs before the body is parsed and a forbidden caller always gets 403.
//! The role lists live in [`focal_core::permissions`].

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use focal_core::permissions::{authorize, Action};

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

impl AuthUser {
    /// Reject with 403 Forbidden unless this user's role may perform `action`.
    ///
    /// ```ignore
    /// async fn delete_task(auth: AuthUser, ...) -> AppResult<...> {
    ///     auth.require(Action::DeleteTask)?;
    ///     ...
    /// }
    /// ```
    pub fn require(&self, action: Action) -> AppResult<()> {
        authorize(self.role, action)?;
        Ok(())
    }
}

/// Type-level name for an [`Action`], used as the parameter of [`Require`].
pub trait Guard: Send + Sync + 'static {
    const ACTION: Action;
}

macro_rules! define_guards {
    ($($name:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Guard for [`Action::", stringify!($name), "`].")]
            pub struct $name;

            impl Guard for $name {
                const ACTION: Action = Action::$name;
            }
        )+
    };
}

/// Guards for the role-restricted handlers that take a request body.
pub mod guard {
    use focal_core::permissions::Action;

    use super::Guard;

    define_guards!(CreateUser, UpdateUser, CreateProject, UpdateProject, CreateTask);
}

/// An [`AuthUser`] whose role may perform `G::ACTION`.
///
/// ```ignore
/// async fn create_task(
///     Require { user, .. }: Require<guard::CreateTask>,
///     Validated(body): Validated<CreateTaskRequest>,
/// ) -> AppResult<...> {
///     // the body is only parsed for permitted callers
/// }
/// ```
pub struct Require<G: Guard> {
    pub user: AuthUser,
    _guard: PhantomData<G>,
}

impl<G: Guard> FromRequestParts<AppState> for Require<G> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require(G::ACTION)?;
        Ok(Require {
            user,
            _guard: PhantomData,
        })
    }
}
