//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod dashboard_repo;
pub mod project_repo;
pub mod project_team_repo;
pub mod task_repo;
pub mod time_entry_repo;
pub mod user_repo;

pub use dashboard_repo::DashboardRepo;
pub use project_repo::ProjectRepo;
pub use project_team_repo::ProjectTeamRepo;
pub use task_repo::TaskRepo;
pub use time_entry_repo::TimeEntryRepo;
pub use user_repo::UserRepo;
