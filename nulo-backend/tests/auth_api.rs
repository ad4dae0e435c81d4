mod common;

use axum::http::StatusCode;
use common::*;
use nulo_backend::database::token_ops;
use nulo_entity::revoked_token;
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, Set};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_health_and_root() {
    let app = test_app().await;

    let (status, body) = get(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["environment"], "test");
    assert_eq!(body["version"], "1.0.0");

    let (status, body) = get(&app, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["docs"], "/api/docs");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = test_app().await;

    let (status, body) = get(&app, "/api/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Nulo Africa API");
    assert!(body["paths"]["/api/v1/auth/login"].is_object());
}

#[tokio::test]
async fn test_register_login_me_logout() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/api/v1/auth/register",
        None,
        json!({
            "email": "Ada@Example.com",
            "password": PASSWORD,
            "full_name": "Ada Obi",
            "user_type": "tenant",
            "phone_number": "+2348000000000",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["trust_score"], 50);
    assert_eq!(body["user"]["tenant_profile"]["profile_completion"], 0);
    assert!(body["user"]["landlord_profile"].is_null());

    let (status, body) = post(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": "ada@example.com", "password": PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = get(&app, "/api/v1/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_name"], "Ada Obi");

    let (status, body) = patch(
        &app,
        "/api/v1/auth/me",
        Some(&token),
        json!({ "full_name": "Ada N. Obi" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_name"], "Ada N. Obi");
    assert_eq!(body["phone_number"], "+2348000000000");

    let (status, body) = post(&app, "/api/v1/auth/logout", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");

    let (status, body) = get(&app, "/api/v1/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let app = test_app().await;
    register(&app, "dup@example.com", "landlord").await;

    let (status, body) = post(
        &app,
        "/api/v1/auth/register",
        None,
        json!({
            "email": "DUP@example.com",
            "password": PASSWORD,
            "full_name": "Someone Else",
            "user_type": "tenant",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("User already registered"));
}

#[tokio::test]
async fn test_register_validation() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/api/v1/auth/register",
        None,
        json!({
            "email": "not-an-email",
            "password": "123",
            "full_name": "Al",
            "user_type": "tenant",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"]["email"].is_array());
    assert!(body["detail"]["password"].is_array());
}

#[tokio::test]
async fn test_bad_credentials() {
    let app = test_app().await;
    register(&app, "kemi@example.com", "tenant").await;

    let (status, body) = post(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": "kemi@example.com", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid email or password");

    let (status, _) = post(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": "nobody@example.com", "password": PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A malformed email is just another unknown account
    let (status, body) = post(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": "not-an-email", "password": PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid email or password");
}

#[tokio::test]
async fn test_missing_or_garbage_token() {
    let app = test_app().await;

    let (status, _) = get(&app, "/api/v1/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = get(&app, "/api/v1/auth/me", Some("not.a.token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Could not validate credentials");
}

#[tokio::test]
async fn test_admin_cleanup_requires_admin() {
    let app = test_app().await;
    let tenant = register(&app, "t@example.com", "tenant").await;
    let admin = register(&app, "root@example.com", "admin").await;

    let (status, body) = post(
        &app,
        "/api/v1/admin/cleanup/revoked-tokens",
        Some(&tenant.token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Only admins can access this resource");

    // A fresh logout is still within its lifetime and survives the purge
    post(&app, "/api/v1/auth/logout", Some(&tenant.token), json!({})).await;

    let (status, body) = post(
        &app,
        "/api/v1/admin/cleanup/revoked-tokens",
        Some(&admin.token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cleanup_type"], "expired_revoked_tokens");
    assert_eq!(body["items_cleaned"], 0);
}

#[tokio::test]
async fn test_admin_cleanup_purges_only_expired_tokens() {
    let (app, state) = test_app_with_state().await;
    let admin = register(&app, "root@example.com", "admin").await;

    let now = chrono::Utc::now();
    let expired_jti = Uuid::new_v4();
    let live_jti = Uuid::new_v4();
    for (jti, expires_at) in [
        (expired_jti, now - chrono::Duration::hours(1)),
        (live_jti, now + chrono::Duration::hours(1)),
    ] {
        revoked_token::ActiveModel {
            jti: Set(jti),
            user_id: Set(admin.id),
            expires_at: Set(expires_at),
            ..revoked_token::ActiveModel::new()
        }
        .insert(&state.db)
        .await
        .unwrap();
    }

    let (status, body) = post(
        &app,
        "/api/v1/admin/cleanup/revoked-tokens",
        Some(&admin.token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items_cleaned"], 1);

    assert!(!token_ops::is_revoked(&state.db, expired_jti).await.unwrap());
    assert!(token_ops::is_revoked(&state.db, live_jti).await.unwrap());

    // Nothing left to purge
    let (_, body) = post(
        &app,
        "/api/v1/admin/cleanup/revoked-tokens",
        Some(&admin.token),
        json!({}),
    )
    .await;
    assert_eq!(body["items_cleaned"], 0);
}
