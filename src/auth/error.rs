// Authentication and authorization error types

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::error::ErrorResponse;

/// Authentication and authorization error types
#[derive(Debug, Error)]
pub enum AuthError {
    // Input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("User with this email already exists")]
    DuplicateUser,
    #[error("Email is already verified")]
    AlreadyVerified,
    #[error("Invalid verification code or email")]
    VerificationFailed,

    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Missing authentication token")]
    MissingToken,
    #[error("User not found")]
    UserNotFound,

    // Authorization errors
    /// Authenticated, but the role is outside the allowed set
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    // Internal errors
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Password hashing error")]
    PasswordHashError,
    #[error("Token generation error: {0}")]
    TokenGenerationError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::InvalidToken => warn!("Invalid token attempt"),
            AuthError::MissingToken => warn!("Missing token in request"),
            AuthError::InsufficientPermissions => warn!("Authorization failed: insufficient permissions"),
            AuthError::DatabaseError(msg) => error!("Database error in auth: {}", msg),
            AuthError::PasswordHashError => error!("Password hashing error"),
            AuthError::TokenGenerationError(msg) => error!("Token generation error: {}", msg),
            _ => {}
        }

        ErrorResponse::new(self.error_message(), self.code()).into_response_with(self.status_code())
    }
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AuthError::DuplicateUser => StatusCode::BAD_REQUEST,
            AuthError::AlreadyVerified => StatusCode::BAD_REQUEST,
            AuthError::VerificationFailed => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AuthError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::PasswordHashError => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::TokenGenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to clients (no sensitive data)
    pub fn error_message(&self) -> String {
        match self {
            AuthError::InvalidInput(msg) => msg.clone(),
            AuthError::DatabaseError(_)
            | AuthError::PasswordHashError
            | AuthError::TokenGenerationError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Machine-readable code for the `error` field of the envelope
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidInput(_) => "INVALID_INPUT",
            AuthError::DuplicateUser => "DUPLICATE_USER",
            AuthError::AlreadyVerified => "ALREADY_VERIFIED",
            AuthError::VerificationFailed => "VERIFICATION_FAILED",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::InsufficientPermissions => "FORBIDDEN",
            AuthError::DatabaseError(_) => "DATABASE_ERROR",
            AuthError::PasswordHashError | AuthError::TokenGenerationError(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::DatabaseError(err.to_string())
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::InvalidInput(format!("Invalid request body: {}", rejection.body_text()))
    }
}
