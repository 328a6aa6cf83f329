//! HTTP-level tests for task endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use focal_core::project::BillingMethod;
use focal_core::roles::Role;
use focal_core::types::DbId;
use focal_db::models::project::{CreateProject, Project, ProjectFields};
use focal_db::repositories::ProjectRepo;
use sqlx::PgPool;

async fn seed_project(pool: &PgPool, manager_id: DbId) -> Project {
    ProjectRepo::create(
        pool,
        &CreateProject {
            fields: ProjectFields {
                name: "Scanning".to_string(),
                description: "Scan everything".to_string(),
                start_date: None,
                end_date: None,
                billing_method: BillingMethod::PerTransaction,
                estimated_hours: 0,
                estimated_transactions: 0,
                manager_id,
                team_leader_id: None,
            },
            roster: Vec::new(),
        },
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_defaults_to_todo_and_round_trips(pool: PgPool) {
    let (manager, token) = common::user_with_token(&pool, "Manager", Role::ProjectManager).await;
    let project = seed_project(&pool, manager.id).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/tasks",
        serde_json::json!({ "title": "Default", "projectId": project.id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "todo");
    assert_eq!(json["priority"], "medium");
    assert_eq!(json["project"]["name"], "Scanning");

    let response = post_json_auth(
        app.clone(),
        "/api/tasks",
        serde_json::json!({ "title": "Explicit", "projectId": project.id, "status": "todo" }),
        &token,
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = get_auth(app, &format!("/api/tasks/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "todo");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_task_validation(pool: PgPool) {
    let (manager, token) = common::user_with_token(&pool, "Manager", Role::ProjectManager).await;
    let project = seed_project(&pool, manager.id).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/tasks",
        serde_json::json!({ "title": "Orphan" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "projectId is required");

    let response = post_json_auth(
        app.clone(),
        "/api/tasks",
        serde_json::json!({ "title": "Bad", "projectId": project.id, "status": "done" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/api/tasks",
        serde_json::json!({ "title": "Ghost", "projectId": 999999 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Referenced record does not exist");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_member_updates_status_of_own_task(pool: PgPool) {
    let (manager, manager_token) =
        common::user_with_token(&pool, "Manager", Role::ProjectManager).await;
    let (member, member_token) = common::user_with_token(&pool, "Member", Role::TeamMember).await;
    let project = seed_project(&pool, manager.id).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/tasks",
        serde_json::json!({ "title": "Scan box 1", "projectId": project.id, "assignedTo": member.id }),
        &manager_token,
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = get_auth(app.clone(), "/api/tasks/my-tasks", &member_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let mine = body_json(response).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["assignee"]["name"], "Member");

    let response = put_json_auth(
        app.clone(),
        &format!("/api/tasks/{id}"),
        serde_json::json!({ "status": "in_progress", "assignedTo": member.id }),
        &member_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["assignedTo"], member.id);

    // Members cannot list every task or delete.
    let response = get_auth(app.clone(), "/api/tasks", &member_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = delete_auth(app.clone(), &format!("/api/tasks/{id}"), &member_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Creating is refused on role alone, even with an invalid body.
    let response = post_json_auth(
        app,
        "/api/tasks",
        serde_json::json!({ "estimatedHours": -1 }),
        &member_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_tasks_and_delete(pool: PgPool) {
    let (manager, token) = common::user_with_token(&pool, "Manager", Role::Admin).await;
    let project = seed_project(&pool, manager.id).await;
    let app = common::build_test_app(pool);

    for title in ["A", "B"] {
        post_json_auth(
            app.clone(),
            "/api/tasks",
            serde_json::json!({ "title": title, "projectId": project.id }),
            &token,
        )
        .await;
    }

    let uri = format!("/api/tasks/project/{}", project.id);
    let response = get_auth(app.clone(), &uri, &token).await;
    let tasks = body_json(response).await;
    assert_eq!(tasks.as_array().unwrap().len(), 2);

    let id = tasks[0]["id"].as_i64().unwrap();
    let response = delete_auth(app.clone(), &format!("/api/tasks/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Task deleted successfully");

    let response = delete_auth(app, &format!("/api/tasks/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
