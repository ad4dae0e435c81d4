mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_only_landlords_create_listings() {
    let app = test_app().await;
    let tenant = register(&app, "tenant@example.com", "tenant").await;

    let (status, body) = post(
        &app,
        "/api/v1/properties",
        Some(&tenant.token),
        listing("Two bedroom flat in Lekki", 1_500_000.0),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Only landlords can access this resource");

    let (status, _) = post(
        &app,
        "/api/v1/properties",
        None,
        listing("Two bedroom flat in Lekki", 1_500_000.0),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_listing_defaults() {
    let app = test_app().await;
    let landlord = register(&app, "owner@example.com", "landlord").await;

    let (status, body) = post(
        &app,
        "/api/v1/properties",
        Some(&landlord.token),
        listing("Two bedroom flat in Lekki", 1_500_000.0),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["landlord_id"], landlord.id.to_string());
    assert_eq!(body["agency_fee"], 0.0);
    assert_eq!(body["city"], "Lagos");
    assert_eq!(body["country"], "Nigeria");
    assert_eq!(body["status"], "active");
    assert_eq!(body["view_count"], 0);
    assert!(body["slug"]
        .as_str()
        .unwrap()
        .starts_with("two-bedroom-flat-in-lekki-"));
    assert_eq!(body["landlord"]["properties_count"], 1);
}

#[tokio::test]
async fn test_listing_validation() {
    let app = test_app().await;
    let landlord = register(&app, "owner@example.com", "landlord").await;

    let (status, body) = post(
        &app,
        "/api/v1/properties",
        Some(&landlord.token),
        listing("Short", 0.0),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"]["title"].is_array());
    assert!(body["detail"]["rent_amount"].is_array());
}

#[tokio::test]
async fn test_search_filters_and_sorting() {
    let app = test_app().await;
    let landlord = register(&app, "owner@example.com", "landlord").await;

    create_listing(&app, &landlord, "Cheap mini flat in Lekki", 800_000.0).await;
    create_listing(&app, &landlord, "Spacious duplex in Lekki", 5_000_000.0).await;
    create_listing(&app, &landlord, "Family home close to school", 2_000_000.0).await;

    let mut draft = listing("Unfinished draft listing here", 1_000_000.0);
    draft["status"] = json!("draft");
    post(&app, "/api/v1/properties", Some(&landlord.token), draft).await;

    let (status, body) = get(&app, "/api/v1/properties/search", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 20);
    assert_eq!(body["pagination"]["total_pages"], 1);

    let (_, body) = get(
        &app,
        "/api/v1/properties/search?min_budget=1000000&sort=price_low",
        None,
    )
    .await;
    let rents: Vec<f64> = body["properties"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["rent_amount"].as_f64().unwrap())
        .collect();
    assert_eq!(rents, vec![2_000_000.0, 5_000_000.0]);

    let (_, body) = get(
        &app,
        "/api/v1/properties/search?max_budget=1000000",
        None,
    )
    .await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["properties"][0]["title"], "Cheap mini flat in Lekki");

    let (_, body) = get(&app, "/api/v1/properties/search?location=LEKKI", None).await;
    assert_eq!(body["pagination"]["total"], 3);

    let (_, body) = get(&app, "/api/v1/properties/search?location=ikoyi", None).await;
    assert_eq!(body["pagination"]["total"], 0);
    assert_eq!(body["pagination"]["total_pages"], 1);

    let (_, body) = get(&app, "/api/v1/properties/search?limit=2&page=2", None).await;
    assert_eq!(body["properties"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["total_pages"], 2);
}

#[tokio::test]
async fn test_search_far_past_last_page() {
    let app = test_app().await;
    let landlord = register(&app, "owner@example.com", "landlord").await;
    create_listing(&app, &landlord, "Cheap mini flat in Lekki", 800_000.0).await;

    let uri = format!("/api/v1/properties/search?limit=100&page={}", u64::MAX);
    let (status, body) = get(&app, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["properties"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["pagination"]["page"], u64::MAX);
}

#[tokio::test]
async fn test_get_counts_views() {
    let app = test_app().await;
    let landlord = register(&app, "owner@example.com", "landlord").await;
    let id = create_listing(&app, &landlord, "Two bedroom flat in Lekki", 1_500_000.0).await;

    let uri = format!("/api/v1/properties/{}", id);
    let (status, body) = get(&app, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view_count"], 1);
    assert_eq!(body["is_favorited"], false);

    let (_, body) = get(&app, &uri, None).await;
    assert_eq!(body["view_count"], 2);

    let missing = format!("/api/v1/properties/{}", uuid::Uuid::new_v4());
    let (status, _) = get(&app, &missing, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_and_delete_ownership() {
    let app = test_app().await;
    let owner = register(&app, "owner@example.com", "landlord").await;
    let other = register(&app, "other@example.com", "landlord").await;
    let id = create_listing(&app, &owner, "Two bedroom flat in Lekki", 1_500_000.0).await;
    let uri = format!("/api/v1/properties/{}", id);

    let (status, body) = patch(&app, &uri, Some(&other.token), json!({ "rent_amount": 1.0 })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["detail"],
        "You don't have permission to update this property"
    );

    let missing = format!("/api/v1/properties/{}", uuid::Uuid::new_v4());
    let (status, _) = patch(&app, &missing, Some(&other.token), json!({ "rent_amount": 1.0 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = patch(
        &app,
        &uri,
        Some(&owner.token),
        json!({ "rent_amount": 1_750_000.0, "amenities": ["pool"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rent_amount"], 1_750_000.0);
    assert_eq!(body["amenities"], json!(["pool"]));
    assert_eq!(body["bedrooms"], 2);

    let (status, _) = delete(&app, &uri, Some(&other.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = delete(&app, &uri, Some(&owner.token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Property deleted successfully");

    let (status, _) = get(&app, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get(&app, "/api/v1/properties/search", None).await;
    assert_eq!(body["pagination"]["total"], 0);
}
