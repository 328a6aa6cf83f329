//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use focal_core::project::{build_roster, BillingMethod};
use focal_core::roles::Role;
use focal_core::types::DbId;
use focal_db::models::project::{CreateProject, Project, ProjectFields};
use focal_db::models::task::{CreateTask, Task};
use focal_db::models::time_entry::{CreateTimeEntry, TimeEntry};
use focal_db::models::user::{CreateUser, User};
use focal_db::repositories::{ProjectRepo, TaskRepo, TimeEntryRepo, UserRepo};
use sqlx::PgPool;

pub async fn user(pool: &PgPool, name: &str, role: Role) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{}@test.com", name.to_lowercase().replace(' ', ".")),
            password_hash: "$argon2id$not-a-real-hash".to_string(),
            role,
        },
    )
    .await
    .unwrap()
}

pub fn project_fields(name: &str, manager_id: DbId, team_leader_id: Option<DbId>) -> ProjectFields {
    ProjectFields {
        name: name.to_string(),
        description: format!("{name} description"),
        start_date: None,
        end_date: None,
        billing_method: BillingMethod::Hourly,
        estimated_hours: 0,
        estimated_transactions: 0,
        manager_id,
        team_leader_id,
    }
}

pub async fn project(
    pool: &PgPool,
    name: &str,
    manager_id: DbId,
    team_leader_id: Option<DbId>,
    member_ids: &[DbId],
) -> Project {
    ProjectRepo::create(
        pool,
        &CreateProject {
            fields: project_fields(name, manager_id, team_leader_id),
            roster: build_roster(team_leader_id, member_ids),
        },
    )
    .await
    .unwrap()
}

pub fn new_task(project_id: DbId, title: &str) -> CreateTask {
    CreateTask {
        title: title.to_string(),
        description: None,
        project_id,
        assigned_to: None,
        status: None,
        priority: None,
        estimated_hours: None,
        estimated_transactions: None,
        transaction_type: None,
        deadline: None,
    }
}

pub async fn task(pool: &PgPool, project_id: DbId, title: &str) -> Task {
    TaskRepo::create(pool, &new_task(project_id, title)).await.unwrap()
}

pub async fn entry(pool: &PgPool, user_id: DbId, task_id: DbId, hours: f64) -> TimeEntry {
    TimeEntryRepo::create(
        pool,
        &CreateTimeEntry {
            user_id,
            task_id,
            hours,
            transactions: 0,
            transaction_type: None,
            date: None,
        },
    )
    .await
    .unwrap()
}
