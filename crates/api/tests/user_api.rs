//! HTTP-level tests for admin user management.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json, post_json_auth, put_json_auth};
use focal_core::roles::Role;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_can_list_users_but_members_cannot(pool: PgPool) {
    let (_, leader_token) = common::user_with_token(&pool, "Lead", Role::TeamLeader).await;
    let (_, member_token) = common::user_with_token(&pool, "Member", Role::TeamMember).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/users", &leader_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = get_auth(app.clone(), "/api/users", &member_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app.clone(), "/api/users/all", &leader_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Non-admins get 403 before their body is looked at.
    let body = serde_json::json!({ "name": "", "email": "not-an-email", "password": "x", "role": "admin" });
    let response = post_json_auth(app.clone(), "/api/users", body.clone(), &leader_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = put_json_auth(app, "/api/users/1", body, &leader_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_creates_user_who_can_log_in(pool: PgPool) {
    let (_, admin_token) = common::user_with_token(&pool, "Admin", Role::Admin).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Lead",
        "email": "lead@test.com",
        "password": "leader-pass",
        "role": "team_leader",
    });
    let response = post_json_auth(app.clone(), "/api/users", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["role"], "team_leader");

    let login = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "email": "lead@test.com", "password": "leader-pass" }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_with_taken_email_returns_400(pool: PgPool) {
    let (admin, admin_token) = common::user_with_token(&pool, "Admin", Role::Admin).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Copy",
        "email": admin.email,
        "password": "whatever",
        "role": "team_member",
    });
    let response = post_json_auth(app, "/api/users", body, &admin_token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Email already exists.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_keeps_password_when_blank(pool: PgPool) {
    let (_, admin_token) = common::user_with_token(&pool, "Admin", Role::Admin).await;
    let target = common::create_user(&pool, "Target", Role::TeamMember).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Renamed",
        "email": target.email,
        "role": "project_manager",
        "password": "",
        "isActive": false,
    });
    let uri = format!("/api/users/{}", target.id);
    let response = put_json_auth(app.clone(), &uri, body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Renamed");
    assert_eq!(json["role"], "project_manager");
    assert_eq!(json["isActive"], false);

    // Still deactivated, so the unchanged password now yields 403 instead of 400.
    let login = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "email": target.email, "password": common::TEST_PASSWORD }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_user_returns_404(pool: PgPool) {
    let (_, admin_token) = common::user_with_token(&pool, "Admin", Role::Admin).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "name": "X", "email": "x@test.com", "role": "team_member" });
    let response = put_json_auth(app, "/api/users/999999", body, &admin_token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_guards(pool: PgPool) {
    let (admin, admin_token) = common::user_with_token(&pool, "Admin", Role::Admin).await;
    let other_admin = common::create_user(&pool, "Other Admin", Role::Admin).await;
    let member = common::create_user(&pool, "Member", Role::TeamMember).await;
    let app = common::build_test_app(pool);

    let response = delete_auth(app.clone(), &format!("/api/users/{}", admin.id), &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Cannot delete your own account.");

    let response =
        delete_auth(app.clone(), &format!("/api/users/{}", other_admin.id), &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Cannot delete admin users.");

    let response = delete_auth(app.clone(), "/api/users/999999", &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &format!("/api/users/{}", member.id), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "User deleted successfully");

    let response = get_auth(app, &format!("/api/users/{}", member.id), &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
