// HTTP handlers for the caller's profile and admin user management

use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Path, State,
};
use axum::Json;
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::auth::{models::ProfileUpdate, CurrentUser, Role, UserResponse};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::validation::validate_required;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// Blank names would break greetings in outgoing mail
pub(crate) fn check_profile_update(update: &ProfileUpdate) -> Result<(), ApiError> {
    if let Some(first_name) = &update.first_name {
        validate_required(first_name, "first_name").map_err(ApiError::BadRequest)?;
    }
    if let Some(last_name) = &update.last_name {
        validate_required(last_name, "last_name").map_err(ApiError::BadRequest)?;
    }
    Ok(())
}

/// GET /api/profile
pub async fn get_profile_handler(user: CurrentUser) -> ApiResponse<UserResponse> {
    ApiResponse::ok("Profile retrieved successfully", UserResponse::from(user.0))
}

/// PUT /api/profile
pub async fn update_profile_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let Json(update) = payload?;
    check_profile_update(&update)?;

    let updated = state
        .users
        .update_profile(user.id(), &update)
        .await?
        .ok_or_else(|| ApiError::not_found("User", user.id()))?;

    info!("User {} updated their profile", user.id());
    Ok(ApiResponse::ok("Profile updated successfully", updated.into()))
}

/// GET /api/admin/users
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<UserResponse>>, ApiError> {
    let users = state.users.list_users().await?;
    Ok(ApiResponse::ok(
        "Users retrieved successfully",
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

/// GET /api/admin/users/role/{role}
pub async fn list_users_by_role_handler(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<ApiResponse<Vec<UserResponse>>, ApiError> {
    let role = Role::from_str(&role).map_err(ApiError::BadRequest)?;
    let users = state.users.list_by_role(role).await?;
    Ok(ApiResponse::ok(
        "Users retrieved successfully",
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

/// PUT /api/admin/users/{id}/role
pub async fn update_user_role_handler(
    State(state): State<AppState>,
    admin: CurrentUser,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateRoleRequest>, JsonRejection>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;

    if id == admin.id() && request.role != Role::Admin {
        return Err(ApiError::BadRequest("Admins cannot demote themselves".to_string()));
    }

    let updated = state
        .users
        .update_role(id, request.role)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;

    info!("Admin {} set role of user {} to {}", admin.id(), id, request.role);
    Ok(ApiResponse::ok("User role updated successfully", updated.into()))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user_handler(
    State(state): State<AppState>,
    admin: CurrentUser,
    id: Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Path(id) = id?;
    if id == admin.id() {
        return Err(ApiError::BadRequest("Admins cannot delete their own account".to_string()));
    }

    if !state.users.delete_user(id).await? {
        return Err(ApiError::not_found("User", id));
    }

    info!("Admin {} deleted user {}", admin.id(), id);
    Ok(ApiResponse::message("User deleted successfully"))
}
