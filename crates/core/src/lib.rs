//! Focal domain core.
//!
//! Role and status vocabularies, the route permission table, time-entry
//! visibility scoping, project roster construction and report helpers.
//! This crate has no database dependencies; callers pass data in.

pub mod enums;
pub mod error;
pub mod permissions;
pub mod project;
pub mod reporting;
pub mod roles;
pub mod task;
pub mod types;
pub mod validation;
pub mod visibility;
