//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create / update DTOs carrying already-validated values
//! - Response shapes with related rows resolved (names, team rosters)
//!
//! Everything that reaches the wire serializes with camelCase field names.

pub mod dashboard;
pub mod project;
pub mod project_team;
pub mod task;
pub mod time_entry;
pub mod user;
