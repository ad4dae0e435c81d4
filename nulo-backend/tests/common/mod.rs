#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use nulo_backend::{config::Config, create_app, database::setup_database, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

pub const PASSWORD: &str = "correct-horse";

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret_key: "integration-test-secret".to_string(),
        jwt_algorithm: "HS256".to_string(),
        access_token_expire_minutes: 30,
        host: "127.0.0.1".to_string(),
        port: 0,
        debug: true,
        environment: "test".to_string(),
        allowed_origins: "http://localhost:3000".to_string(),
        cleanup_interval_hours: 24,
    }
}

/// Router plus the state behind it, for tests that inspect the database
pub async fn test_app_with_state() -> (Router, AppState) {
    let config = test_config();
    let db = setup_database(&config.database_url)
        .await
        .expect("Failed to set up test database");
    let state = AppState::new(db, config).expect("Failed to build app state");
    (create_app(state.clone()), state)
}

/// Fresh router over its own in-memory database
pub async fn test_app() -> Router {
    test_app_with_state().await.0
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post(app: &Router, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    send(app, Method::PATCH, uri, token, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, token, None).await
}

/// A registered account and its bearer token
pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

pub async fn register(app: &Router, email: &str, user_type: &str) -> TestUser {
    let (status, body) = post(
        app,
        "/api/v1/auth/register",
        None,
        json!({
            "email": email,
            "password": PASSWORD,
            "full_name": format!("{} user", user_type),
            "user_type": user_type,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", body);

    TestUser {
        id: body["user"]["id"].as_str().unwrap().parse().unwrap(),
        token: body["access_token"].as_str().unwrap().to_string(),
    }
}

pub fn listing(title: &str, rent: f64) -> Value {
    json!({
        "title": title,
        "description": "Bright flat close to the market",
        "rent_amount": rent,
        "location": "Lekki Phase 1",
        "bedrooms": 2,
        "bathrooms": 2,
        "amenities": ["parking", "generator"],
        "status": "active",
    })
}

pub async fn create_listing(app: &Router, landlord: &TestUser, title: &str, rent: f64) -> Uuid {
    let (status, body) = post(
        app,
        "/api/v1/properties",
        Some(&landlord.token),
        listing(title, rent),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create property failed: {}", body);
    body["id"].as_str().unwrap().parse().unwrap()
}

pub fn wizard(join_rent_credit: bool) -> Value {
    json!({
        "budget": 2500000.0,
        "preferred_location": "Lekki",
        "bedrooms": 2,
        "id_document_url": "https://files.example.com/id.png",
        "proof_of_income_url": "https://files.example.com/payslip.pdf",
        "reference1_email": "boss@example.com",
        "join_rent_credit": join_rent_credit,
    })
}

pub async fn complete_profile(app: &Router, tenant: &TestUser) -> Value {
    let (status, body) = post(
        app,
        "/api/v1/tenants/complete-profile",
        Some(&tenant.token),
        wizard(false),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "complete profile failed: {}", body);
    body
}
