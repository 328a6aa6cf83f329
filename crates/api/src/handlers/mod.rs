pub mod auth;
pub mod dashboard;
pub mod projects;
pub mod tasks;
pub mod time_entries;
pub mod users;
