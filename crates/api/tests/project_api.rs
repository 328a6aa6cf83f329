//! HTTP-level tests for project CRUD and roster handling.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use focal_core::roles::Role;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_project_defaults_and_roster(pool: PgPool) {
    let (manager, token) = common::user_with_token(&pool, "Manager", Role::ProjectManager).await;
    let leader = common::create_user(&pool, "Leader", Role::TeamLeader).await;
    let member = common::create_user(&pool, "Member", Role::TeamMember).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Archive scan",
        "description": "Digitise the archive",
        "teamLeaderId": leader.id,
        "teamMemberIds": [member.id, leader.id],
    });
    let response = post_json_auth(app, "/api/projects", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["status"], "planning");
    assert_eq!(json["billingMethod"], "hourly");
    assert_eq!(json["managerId"], manager.id);
    assert_eq!(json["manager"]["name"], "Manager");
    assert_eq!(json["teamLeader"]["id"], leader.id);

    let team = json["teamMembers"].as_array().unwrap();
    assert_eq!(team.len(), 2);
    assert_eq!(team[0]["id"], leader.id);
    assert_eq!(team[0]["role"], "lead");
    assert_eq!(team[1]["id"], member.id);
    assert_eq!(team[1]["role"], "member");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_project_requires_description(pool: PgPool) {
    let (_, token) = common::user_with_token(&pool, "Manager", Role::Admin).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "No description" });
    let response = post_json_auth(app, "/api/projects", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "description is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_team_member_cannot_create_but_can_list(pool: PgPool) {
    let (_, token) = common::user_with_token(&pool, "Member", Role::TeamMember).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "P", "description": "D" });
    let response = post_json_auth(app.clone(), "/api/projects", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/projects", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_check_runs_before_body_validation(pool: PgPool) {
    let (_, token) = common::user_with_token(&pool, "Member", Role::TeamMember).await;
    let app = common::build_test_app(pool);

    // A negative estimate would be a 400 for staff.
    let body = serde_json::json!({ "name": "P", "description": "D", "estimatedHours": -5 });
    let response = post_json_auth(app.clone(), "/api/projects", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(app, "/api/projects/1", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_roster_and_status(pool: PgPool) {
    let (_, token) = common::user_with_token(&pool, "Manager", Role::ProjectManager).await;
    let leader = common::create_user(&pool, "Leader", Role::TeamLeader).await;
    let first = common::create_user(&pool, "First", Role::TeamMember).await;
    let second = common::create_user(&pool, "Second", Role::TeamMember).await;
    let app = common::build_test_app(pool);

    let created = post_json_auth(
        app.clone(),
        "/api/projects",
        serde_json::json!({
            "name": "P",
            "description": "D",
            "teamLeaderId": leader.id,
            "teamMemberIds": [first.id],
        }),
        &token,
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();

    let body = serde_json::json!({
        "name": "P2",
        "description": "D2",
        "status": "on_hold",
        "teamMemberIds": [second.id],
    });
    let response = put_json_auth(app.clone(), &format!("/api/projects/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "P2");
    assert_eq!(json["status"], "on_hold");
    // The leader is kept when the body omits it.
    assert_eq!(json["teamLeaderId"], leader.id);

    let ids: Vec<i64> = json["teamMembers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![leader.id, second.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_rejects_end_before_start(pool: PgPool) {
    let (_, token) = common::user_with_token(&pool, "Manager", Role::ProjectManager).await;
    let app = common::build_test_app(pool);

    let created = post_json_auth(
        app.clone(),
        "/api/projects",
        serde_json::json!({ "name": "P", "description": "D" }),
        &token,
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();

    let body = serde_json::json!({
        "name": "P",
        "description": "D",
        "startDate": "2025-03-10T00:00:00Z",
        "endDate": "2025-03-01T00:00:00Z",
    });
    let response = put_json_auth(app, &format!("/api/projects/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_and_delete_missing_project_return_404(pool: PgPool) {
    let (_, token) = common::user_with_token(&pool, "Admin", Role::Admin).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/projects/424242", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), "/api/projects/424242", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = serde_json::json!({ "name": "P", "description": "D" });
    let response = put_json_auth(app, "/api/projects/424242", body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_project(pool: PgPool) {
    let (_, token) = common::user_with_token(&pool, "Admin", Role::Admin).await;
    let app = common::build_test_app(pool);

    let created = post_json_auth(
        app.clone(),
        "/api/projects",
        serde_json::json!({ "name": "P", "description": "D" }),
        &token,
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();

    let response = delete_auth(app.clone(), &format!("/api/projects/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Project deleted successfully");

    let response = get_auth(app, &format!("/api/projects/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
