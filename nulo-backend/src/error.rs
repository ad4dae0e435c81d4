use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

const REDACTED_DETAIL: &str = "An error occurred";

/// Full text of an internal error. Rides on the response so that only
/// routers built in debug mode put it back into the body.
#[derive(Clone, Debug)]
pub struct InternalDetail(pub String);

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

impl AppError {
    /// The 401 every auth failure collapses into
    pub fn credentials() -> Self {
        AppError::Unauthorized("Could not validate credentials".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseError(_)
            | AppError::ConfigError(_)
            | AppError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<nulo_auth::PasswordError> for AppError {
    fn from(err: nulo_auth::PasswordError) -> Self {
        AppError::ServerError(err.to_string())
    }
}

impl From<nulo_auth::TokenError> for AppError {
    fn from(err: nulo_auth::TokenError) -> Self {
        AppError::ServerError(format!("Failed to issue token: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (error_message, detail) = match &self {
            AppError::NotFound(msg) => ("Not found", json!(msg)),
            AppError::BadRequest(msg) => ("Bad request", json!(msg)),
            AppError::Unauthorized(msg) => ("Unauthorized", json!(msg)),
            AppError::Forbidden(msg) => ("Forbidden", json!(msg)),
            AppError::Validation(errors) => ("Validation error", json!(errors.field_errors())),
            AppError::DatabaseError(_)
            | AppError::ConfigError(_)
            | AppError::ServerError(_) => {
                tracing::error!("Internal error: {}", self);
                ("Internal server error", json!(REDACTED_DETAIL))
            }
        };

        let mut response = (status, error_body(error_message, detail)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            response
                .extensions_mut()
                .insert(InternalDetail(self.to_string()));
        }
        response
    }
}

fn error_body(error_message: &str, detail: Value) -> Json<Value> {
    Json(json!({
        "success": false,
        "error": error_message,
        "detail": detail
    }))
}

/// Debug-mode middleware: swap the redacted detail of a 500 for the real error
pub async fn expose_internal_details(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let Some(InternalDetail(detail)) = response.extensions_mut().remove::<InternalDetail>()
    else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    let body = error_body("Internal server error", json!(detail)).into_response();
    Response::from_parts(parts, body.into_body())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unauthorized_carries_bearer_challenge() {
        let response = AppError::credentials().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["detail"], "Could not validate credentials");
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = AppError::NotFound("Property not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Not found");
        assert_eq!(body["detail"], "Property not found");
    }

    #[tokio::test]
    async fn test_internal_detail_is_redacted_in_body() {
        let response = AppError::ServerError("disk full".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.extensions().get::<InternalDetail>().unwrap().0,
            "Server error: disk full"
        );

        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["detail"], REDACTED_DETAIL);
    }

    #[test]
    fn test_internal_errors_map_to_500() {
        assert_eq!(
            AppError::ServerError("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::DatabaseError(sea_orm::DbErr::Custom("x".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
