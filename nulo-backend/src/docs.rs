use axum::response::Html;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::*;

/// Registers the bearer scheme referenced by protected routes
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root,
        handlers::health_check,
        handlers::cleanup_revoked_tokens,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::auth::update_me,
        handlers::auth::logout,
        handlers::properties::search_properties,
        handlers::properties::create_property,
        handlers::properties::get_property,
        handlers::properties::update_property,
        handlers::properties::delete_property,
        handlers::applications::create_application,
        handlers::applications::list_applications,
        handlers::applications::approve_application,
        handlers::applications::reject_application,
        handlers::tenants::get_profile,
        handlers::tenants::profile_status,
        handlers::tenants::update_profile,
        handlers::tenants::complete_profile,
        handlers::favorites::list_favorites,
        handlers::favorites::add_favorite,
        handlers::favorites::remove_favorite,
        handlers::messages::list_conversations,
        handlers::messages::get_thread,
        handlers::messages::send_message,
    ),
    components(
        schemas(
            UserType,
            VerificationStatus,
            PropertyType,
            PropertyStatus,
            ApplicationStatus,
            TransactionStatus,
            SortOrder,
            UserRegister,
            UserLogin,
            UserUpdate,
            TenantProfile,
            LandlordProfile,
            UserResponse,
            UserSummary,
            AuthResponse,
            PropertyCreate,
            PropertyUpdate,
            LandlordInfo,
            PropertyResponse,
            PropertyListResponse,
            Pagination,
            ApplicationCreate,
            ApplicationReject,
            PropertySummary,
            ApplicationResponse,
            TransactionResponse,
            ApplicationCreatedResponse,
            ApplicationListResponse,
            TenantProfileUpdate,
            CompleteProfileData,
            TenantProfileResponse,
            ProfileStatusResponse,
            CompleteProfileResponse,
            FavoriteCreate,
            FavoriteResponse,
            FavoriteCreatedResponse,
            FavoriteListResponse,
            MessageCreate,
            Participant,
            MessageResponse,
            LastMessage,
            Conversation,
            ConversationListResponse,
            MessageThreadResponse,
            MessageSentResponse,
            SuccessResponse,
            HealthResponse,
            RootResponse,
            CleanupResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Service", description = "Health and discovery"),
        (name = "Authentication", description = "Accounts and access tokens"),
        (name = "Properties", description = "Rental listings"),
        (name = "Applications", description = "Rental applications and mock escrow"),
        (name = "Tenants", description = "Tenant onboarding"),
        (name = "Favorites", description = "Saved listings"),
        (name = "Messages", description = "Direct messages"),
        (name = "Admin", description = "Maintenance"),
    ),
    info(
        title = "Nulo Africa API",
        version = "1.0.0",
        description = "Backend API for Nulo Africa - Zero Agency Fee Rental Platform",
    )
)]
pub struct ApiDoc;

/// Where the generated document is served
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// Swagger UI at `/api/docs`, which also serves the JSON document
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api/docs").url(OPENAPI_PATH, ApiDoc::openapi())
}

const REDOC: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Nulo Africa API - ReDoc</title>
</head>
<body>
  <redoc spec-url="/api/openapi.json"></redoc>
  <script src="https://cdn.redoc.ly/redoc/latest/bundles/redoc.standalone.js"></script>
</body>
</html>
"#;

pub async fn redoc() -> Html<&'static str> {
    Html(REDOC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_versioned_routes() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.version, API_VERSION);
        assert!(doc.paths.paths.contains_key("/api/v1/properties/search"));
        assert!(doc.paths.paths.contains_key("/api/v1/applications/{application_id}/approve"));
        assert!(doc
            .components
            .as_ref()
            .map(|c| c.security_schemes.contains_key("bearer"))
            .unwrap_or(false));
    }
}
