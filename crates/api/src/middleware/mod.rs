//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac`] -- Checks an [`AuthUser`](auth::AuthUser) against the route permission table.

pub mod auth;
pub mod rbac;
