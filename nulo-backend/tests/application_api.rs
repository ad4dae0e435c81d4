mod common;

use axum::http::StatusCode;
use common::*;
use nulo_backend::database::application_ops;
use serde_json::json;
use uuid::Uuid;

async fn escrow_status(state: &nulo_backend::AppState, application_id: &str) -> String {
    let application_id: Uuid = application_id.parse().unwrap();
    application_ops::get_transaction_for_application(&state.db, application_id)
        .await
        .unwrap()
        .expect("escrow row")
        .status
}

#[tokio::test]
async fn test_profile_onboarding() {
    let app = test_app().await;
    let tenant = register(&app, "tenant@example.com", "tenant").await;

    let (status, body) = get(&app, "/api/v1/tenants/profile-status", Some(&tenant.token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile_completion"], 0);
    assert_eq!(body["can_apply"], false);
    assert_eq!(
        body["missing_fields"],
        json!(["budget", "preferred_location", "id_document", "proof_of_income"])
    );

    let (status, body) = patch(
        &app,
        "/api/v1/tenants/profile",
        Some(&tenant.token),
        json!({ "budget": 1200000.0, "preferred_location": "Yaba" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["budget"], 1200000.0);
    assert_eq!(body["profile"]["profile_completion"], 33);

    let body = complete_profile(&app, &tenant).await;
    assert_eq!(body["trust_score"], 70);
    assert_eq!(body["profile"]["profile_completion"], 100);
    assert_eq!(body["profile"]["onboarding_completed"], true);
    assert_eq!(
        body["message"],
        "Profile completed! You can now apply for properties."
    );

    let (_, body) = get(&app, "/api/v1/tenants/profile-status", Some(&tenant.token)).await;
    assert_eq!(body["can_apply"], true);
    assert_eq!(body["verification_status"], "approved");
    assert_eq!(body["missing_fields"], json!([]));
}

#[tokio::test]
async fn test_rent_credit_bonus() {
    let app = test_app().await;
    let tenant = register(&app, "tenant@example.com", "tenant").await;

    let (status, body) = post(
        &app,
        "/api/v1/tenants/complete-profile",
        Some(&tenant.token),
        wizard(true),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trust_score"], 80);
}

#[tokio::test]
async fn test_tenant_routes_reject_landlords() {
    let app = test_app().await;
    let landlord = register(&app, "owner@example.com", "landlord").await;

    let (status, body) = get(&app, "/api/v1/tenants/profile", Some(&landlord.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Only tenants can access this resource");
}

#[tokio::test]
async fn test_incomplete_profile_cannot_apply() {
    let app = test_app().await;
    let landlord = register(&app, "owner@example.com", "landlord").await;
    let tenant = register(&app, "tenant@example.com", "tenant").await;
    let property_id = create_listing(&app, &landlord, "Two bedroom flat in Lekki", 1_500_000.0).await;

    let (status, body) = post(
        &app,
        "/api/v1/applications",
        Some(&tenant.token),
        json!({ "property_id": property_id }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("complete your profile"));
}

#[tokio::test]
async fn test_apply_and_approve() {
    let (app, state) = test_app_with_state().await;
    let landlord = register(&app, "owner@example.com", "landlord").await;
    let tenant = register(&app, "tenant@example.com", "tenant").await;
    let property_id = create_listing(&app, &landlord, "Two bedroom flat in Lekki", 1_500_000.0).await;
    complete_profile(&app, &tenant).await;

    let (status, body) = post(
        &app,
        "/api/v1/applications",
        Some(&tenant.token),
        json!({ "property_id": property_id, "message": "I would love to move in soon" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Application submitted successfully");
    assert_eq!(body["application"]["status"], "submitted");
    assert_eq!(body["transaction"]["status"], "held");
    assert_eq!(body["transaction"]["amount"], 1_500_000.0);
    assert_eq!(body["transaction"]["currency"], "NGN");
    let application_id = body["application"]["id"].as_str().unwrap().to_string();

    let (status, body) = post(
        &app,
        "/api/v1/applications",
        Some(&tenant.token),
        json!({ "property_id": property_id }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "You have already applied for this property");

    let (_, body) = get(&app, "/api/v1/applications", Some(&tenant.token)).await;
    let listed = body["applications"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["property"]["landlord"]["id"], landlord.id.to_string());

    let (_, body) = get(&app, "/api/v1/applications", Some(&landlord.token)).await;
    assert_eq!(body["applications"][0]["tenant"]["id"], tenant.id.to_string());

    let (_, body) = get(&app, &format!("/api/v1/properties/{}", property_id), None).await;
    assert_eq!(body["application_count"], 1);

    let approve = format!("/api/v1/applications/{}/approve", application_id);
    let (status, body) = patch(&app, &approve, Some(&landlord.token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Application approved successfully");
    assert_eq!(escrow_status(&state, &application_id).await, "released");

    let (_, body) = get(&app, &format!("/api/v1/properties/{}", property_id), None).await;
    assert_eq!(body["status"], "rented");

    let (_, body) = get(&app, "/api/v1/auth/me", Some(&tenant.token)).await;
    assert_eq!(body["trust_score"], 75);

    let (status, body) = patch(&app, &approve, Some(&landlord.token), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Application is already approved");
}

#[tokio::test]
async fn test_reject_and_ownership() {
    let (app, state) = test_app_with_state().await;
    let landlord = register(&app, "owner@example.com", "landlord").await;
    let stranger = register(&app, "stranger@example.com", "landlord").await;
    let tenant = register(&app, "tenant@example.com", "tenant").await;
    let property_id = create_listing(&app, &landlord, "Two bedroom flat in Lekki", 1_500_000.0).await;
    complete_profile(&app, &tenant).await;

    let (_, body) = post(
        &app,
        "/api/v1/applications",
        Some(&tenant.token),
        json!({ "property_id": property_id }),
    )
    .await;
    let application_id = body["application"]["id"].as_str().unwrap().to_string();
    let reject = format!("/api/v1/applications/{}/reject", application_id);
    let reason = json!({ "reason": "Income too low", "reason_code": "insufficient_income" });

    let (status, _) = patch(&app, &reject, Some(&stranger.token), reason.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = patch(&app, &reject, Some(&tenant.token), reason.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = patch(&app, &reject, Some(&landlord.token), reason.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Application rejected");
    assert_eq!(escrow_status(&state, &application_id).await, "refunded");

    let (_, body) = get(&app, "/api/v1/applications", Some(&tenant.token)).await;
    let application = &body["applications"][0];
    assert_eq!(application["status"], "rejected");
    assert_eq!(application["rejection_reason"], "Income too low");
    assert_eq!(application["reason_code"], "insufficient_income");

    let (_, body) = get(&app, &format!("/api/v1/properties/{}", property_id), None).await;
    assert_eq!(body["status"], "active");

    let missing = format!("/api/v1/applications/{}/approve", Uuid::new_v4());
    let (status, _) = patch(&app, &missing, Some(&landlord.token), json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unavailable_property() {
    let app = test_app().await;
    let landlord = register(&app, "owner@example.com", "landlord").await;
    let tenant = register(&app, "tenant@example.com", "tenant").await;
    complete_profile(&app, &tenant).await;

    let mut draft = listing("Unfinished draft listing here", 1_000_000.0);
    draft["status"] = json!("draft");
    let (_, body) = post(&app, "/api/v1/properties", Some(&landlord.token), draft).await;

    let (status, body) = post(
        &app,
        "/api/v1/applications",
        Some(&tenant.token),
        json!({ "property_id": body["id"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Property is not available for applications");

    let (status, _) = post(
        &app,
        "/api/v1/applications",
        Some(&tenant.token),
        json!({ "property_id": Uuid::new_v4() }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn submitted_application(
    app: &axum::Router,
    landlord: &TestUser,
    tenant: &TestUser,
) -> (String, Uuid) {
    let property_id = create_listing(app, landlord, "Two bedroom flat in Lekki", 1_500_000.0).await;
    complete_profile(app, tenant).await;

    let (status, body) = post(
        app,
        "/api/v1/applications",
        Some(&tenant.token),
        json!({ "property_id": property_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "apply failed: {}", body);
    (body["application"]["id"].as_str().unwrap().to_string(), property_id)
}

#[tokio::test]
async fn test_concurrent_decisions_apply_once() {
    let (app, state) = test_app_with_state().await;
    let landlord = register(&app, "owner@example.com", "landlord").await;
    let tenant = register(&app, "tenant@example.com", "tenant").await;
    let (application_id, property_id) = submitted_application(&app, &landlord, &tenant).await;

    let approve = format!("/api/v1/applications/{}/approve", application_id);
    let reject = format!("/api/v1/applications/{}/reject", application_id);
    let reason = json!({ "reason": "Income too low", "reason_code": "insufficient_income" });

    let (first, second, third) = tokio::join!(
        patch(&app, &approve, Some(&landlord.token), json!({})),
        patch(&app, &approve, Some(&landlord.token), json!({})),
        patch(&app, &reject, Some(&landlord.token), reason),
    );
    let statuses = [first.0, second.0, third.0];
    let winners = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    assert_eq!(winners, 1, "statuses: {:?}", statuses);
    for (status, body) in [&first, &second, &third] {
        if *status != StatusCode::OK {
            assert_eq!(*status, StatusCode::BAD_REQUEST);
            assert!(body["detail"]
                .as_str()
                .unwrap()
                .starts_with("Application is already"));
        }
    }

    let (_, body) = get(&app, "/api/v1/applications", Some(&tenant.token)).await;
    let application = &body["applications"][0];
    let (_, property) = get(&app, &format!("/api/v1/properties/{}", property_id), None).await;
    let (_, me) = get(&app, "/api/v1/auth/me", Some(&tenant.token)).await;
    let escrow = escrow_status(&state, &application_id).await;

    // The escrow, listing and trust side effects match the single winning decision
    if third.0 == StatusCode::OK {
        assert_eq!(application["status"], "rejected");
        assert_eq!(escrow, "refunded");
        assert_eq!(property["status"], "active");
        assert_eq!(me["trust_score"], 70);
    } else {
        assert_eq!(application["status"], "approved");
        assert_eq!(escrow, "released");
        assert_eq!(property["status"], "rented");
        assert_eq!(me["trust_score"], 75);
    }
}

#[tokio::test]
async fn test_concurrent_duplicate_applications() {
    let app = test_app().await;
    let landlord = register(&app, "owner@example.com", "landlord").await;
    let tenant = register(&app, "tenant@example.com", "tenant").await;
    let property_id = create_listing(&app, &landlord, "Two bedroom flat in Lekki", 1_500_000.0).await;
    complete_profile(&app, &tenant).await;

    let body = json!({ "property_id": property_id });
    let (first, second) = tokio::join!(
        post(&app, "/api/v1/applications", Some(&tenant.token), body.clone()),
        post(&app, "/api/v1/applications", Some(&tenant.token), body.clone()),
    );

    let mut statuses = [first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::BAD_REQUEST]);
    let loser = if first.0 == StatusCode::OK { &second.1 } else { &first.1 };
    assert_eq!(loser["detail"], "You have already applied for this property");

    let (_, body) = get(&app, &format!("/api/v1/properties/{}", property_id), None).await;
    assert_eq!(body["application_count"], 1);
}

#[tokio::test]
async fn test_admins_have_no_application_list() {
    let app = test_app().await;
    let admin = register(&app, "root@example.com", "admin").await;

    let (status, body) = get(&app, "/api/v1/applications", Some(&admin.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Invalid user type");
}
