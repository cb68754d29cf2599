// Error handling module for the Nomado API
// Provides the shared error envelope and the catch-all handler error type

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use utoipa::ToSchema;

use crate::auth::AuthError;
use crate::pricing::PricingError;

/// Error envelope returned by every failing endpoint
///
/// `success` is always false. `error` carries a machine-readable code such as
/// `NOT_FOUND`; `details` is only present for field-level validation failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, code: &str) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(code.to_string()),
            details: None,
        }
    }

    /// Render with the given status code
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Main error type for the catalog, booking and user handlers
///
/// Auth and pricing failures keep their own enums and are carried through
/// unchanged so their status codes survive.
#[derive(Debug)]
pub enum ApiError {
    /// Field-level validation failures from `validator`
    ValidationError(validator::ValidationErrors),

    /// Malformed body, bad query value or a rule the request broke
    BadRequest(String),

    NotFound { resource: String, id: String },

    /// Full details are logged; the client sees a generic message
    DatabaseError(sqlx::Error),

    InternalError(String),

    Unauthorized(String),

    Forbidden(String),

    Auth(AuthError),

    Pricing(PricingError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(err) => err.into_response(),
            ApiError::Pricing(err) => err.into_response(),
            other => {
                let (status, body) = other.to_error_response();
                body.into_response_with(status)
            }
        }
    }
}

impl ApiError {
    /// Convert to status code and envelope, logging by severity:
    /// debug for expected client errors, warn for access failures,
    /// error for anything that is our fault.
    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::ValidationError(errors) => {
                debug!("Validation error: {:?}", errors);
                let mut body = ErrorResponse::new("Request validation failed", "VALIDATION_ERROR");
                body.details = serde_json::to_value(errors).ok();
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::BadRequest(message) => {
                debug!("Bad request: {}", message);
                (StatusCode::BAD_REQUEST, ErrorResponse::new(message.clone(), "BAD_REQUEST"))
            }
            ApiError::NotFound { resource, id } => {
                debug!("Resource not found: {} with id {}", resource, id);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new(format!("{} with id {} not found", resource, id), "NOT_FOUND"),
                )
            }
            ApiError::DatabaseError(db_error) => {
                error!("Database error: {:?}", db_error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("A database error occurred", "DATABASE_ERROR"),
                )
            }
            ApiError::InternalError(internal_msg) => {
                error!("Internal error: {}", internal_msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("An internal server error occurred", "INTERNAL_ERROR"),
                )
            }
            ApiError::Unauthorized(message) => {
                warn!("Unauthorized access attempt: {}", message);
                (StatusCode::UNAUTHORIZED, ErrorResponse::new(message.clone(), "UNAUTHORIZED"))
            }
            ApiError::Forbidden(message) => {
                warn!("Forbidden access attempt: {}", message);
                (StatusCode::FORBIDDEN, ErrorResponse::new(message.clone(), "FORBIDDEN"))
            }
            ApiError::Auth(err) => (err.status_code(), ErrorResponse::new(err.error_message(), err.code())),
            ApiError::Pricing(err) => (err.status_code(), ErrorResponse::new(err.error_message(), err.code())),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Auth(err) => err.status_code(),
            ApiError::Pricing(err) => err.status_code(),
        }
    }

    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        ApiError::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        ApiError::DatabaseError(error)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        ApiError::Auth(error)
    }
}

impl From<PricingError> for ApiError {
    fn from(error: PricingError) -> Self {
        ApiError::Pricing(error)
    }
}
