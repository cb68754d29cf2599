// HTTP handlers for authentication endpoints

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

use crate::auth::{
    error::AuthError,
    middleware::CurrentUser,
    models::{
        AuthPayload, LoginRequest, RegisterRequest, ResendVerificationRequest, UserResponse,
        VerifyEmailRequest,
    },
};
use crate::response::ApiResponse;
use crate::AppState;

/// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered, verification email queued", body = AuthPayload),
        (status = 400, description = "Invalid input or duplicate email", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<AuthPayload>>), AuthError> {
    let Json(request) = payload?;
    let auth = state.auth.register(request).await?;
    Ok(ApiResponse::created(
        "User registered successfully. Please check your email to verify your account.",
        auth,
    ))
}

/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthPayload),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiResponse<AuthPayload>, AuthError> {
    let Json(request) = payload?;
    let auth = state.auth.login(&request.email, &request.password).await?;
    Ok(ApiResponse::ok("Login successful", auth))
}

/// POST /api/auth/verify-email
#[utoipa::path(
    post,
    path = "/api/auth/verify-email",
    request_body = VerifyEmailRequest,
    responses(
        (status = 200, description = "Email verified"),
        (status = 400, description = "Invalid code or email", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn verify_email_handler(
    State(state): State<AppState>,
    payload: Result<Json<VerifyEmailRequest>, JsonRejection>,
) -> Result<ApiResponse<()>, AuthError> {
    let Json(request) = payload?;
    state.auth.verify_email(&request.email, &request.code).await?;
    Ok(ApiResponse::message("Email verified successfully"))
}

/// POST /api/auth/resend-verification
#[utoipa::path(
    post,
    path = "/api/auth/resend-verification",
    request_body = ResendVerificationRequest,
    responses(
        (status = 200, description = "A new code was issued"),
        (status = 400, description = "Email is already verified", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn resend_verification_handler(
    State(state): State<AppState>,
    payload: Result<Json<ResendVerificationRequest>, JsonRejection>,
) -> Result<ApiResponse<()>, AuthError> {
    let Json(request) = payload?;
    state.auth.resend_verification(&request.email).await?;
    Ok(ApiResponse::message("Verification email sent"))
}

/// GET /api/auth/me
pub async fn me_handler(user: CurrentUser) -> Result<ApiResponse<UserResponse>, AuthError> {
    Ok(ApiResponse::ok("Current user", UserResponse::from(user.0)))
}
