// HTTP handlers for destinations, service types and services

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use crate::auth::{CurrentUser, Role};
use crate::catalog::models::{
    CreateDestination, CreateService, Destination, Service, ServiceFilter, ServiceType,
    ServiceTypeInput, UpdateDestination, UpdateService,
};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::validation::validate_non_negative_price;
use crate::AppState;

/// GET /api/destinations
#[utoipa::path(
    get,
    path = "/api/destinations",
    responses(
        (status = 200, description = "All destinations, best rated first", body = [Destination])
    ),
    tag = "destinations"
)]
pub async fn list_destinations_handler(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Destination>>, ApiError> {
    let destinations = state.destinations.list().await?;
    Ok(ApiResponse::ok("Destinations retrieved successfully", destinations))
}

/// GET /api/destinations/{id}
#[utoipa::path(
    get,
    path = "/api/destinations/{id}",
    params(("id" = i32, Path, description = "Destination ID")),
    responses(
        (status = 200, description = "Destination found", body = Destination),
        (status = 404, description = "Destination not found", body = crate::error::ErrorResponse)
    ),
    tag = "destinations"
)]
pub async fn get_destination_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<Destination>, ApiError> {
    let Path(id) = id?;
    let destination = state
        .destinations
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Destination", id))?;

    Ok(ApiResponse::ok("Destination retrieved successfully", destination))
}

/// POST /api/admin/destinations
#[utoipa::path(
    post,
    path = "/api/admin/destinations",
    request_body = CreateDestination,
    responses(
        (status = 201, description = "Destination created", body = Destination),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 403, description = "Not an admin", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "destinations"
)]
pub async fn create_destination_handler(
    State(state): State<AppState>,
    admin: CurrentUser,
    payload: Result<Json<CreateDestination>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Destination>>), ApiError> {
    let Json(input) = payload?;
    input.validate()?;

    let destination = state.destinations.create(&input).await?;
    info!("Admin {} created destination {}", admin.id(), destination.id);

    Ok(ApiResponse::created("Destination created successfully", destination))
}

/// PUT /api/admin/destinations/{id}
#[utoipa::path(
    put,
    path = "/api/admin/destinations/{id}",
    params(("id" = i32, Path, description = "Destination ID")),
    request_body = UpdateDestination,
    responses(
        (status = 200, description = "Destination updated", body = Destination),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 404, description = "Destination not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "destinations"
)]
pub async fn update_destination_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateDestination>, JsonRejection>,
) -> Result<ApiResponse<Destination>, ApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    input.validate()?;

    let destination = state
        .destinations
        .update(id, &input)
        .await?
        .ok_or_else(|| ApiError::not_found("Destination", id))?;

    info!("Updated destination {}", id);
    Ok(ApiResponse::ok("Destination updated successfully", destination))
}

/// DELETE /api/admin/destinations/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/destinations/{id}",
    params(("id" = i32, Path, description = "Destination ID")),
    responses(
        (status = 200, description = "Destination deleted"),
        (status = 404, description = "Destination not found", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "destinations"
)]
pub async fn delete_destination_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Path(id) = id?;
    if !state.destinations.delete(id).await? {
        return Err(ApiError::not_found("Destination", id));
    }

    info!("Deleted destination {}", id);
    Ok(ApiResponse::message("Destination deleted successfully"))
}

pub async fn list_service_types_handler(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<ServiceType>>, ApiError> {
    let types = state.service_types.list().await?;
    Ok(ApiResponse::ok("Service types retrieved successfully", types))
}

pub async fn get_service_type_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<ServiceType>, ApiError> {
    let Path(id) = id?;
    let service_type = state
        .service_types
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Service type", id))?;

    Ok(ApiResponse::ok("Service type retrieved successfully", service_type))
}

pub async fn create_service_type_handler(
    State(state): State<AppState>,
    payload: Result<Json<ServiceTypeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceType>>), ApiError> {
    let Json(input) = payload?;
    input.validate()?;

    let service_type = state.service_types.create(&input).await?;
    info!("Created service type {} ({})", service_type.id, service_type.name);

    Ok(ApiResponse::created("Service type created successfully", service_type))
}

pub async fn update_service_type_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ServiceTypeInput>, JsonRejection>,
) -> Result<ApiResponse<ServiceType>, ApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    input.validate()?;

    let service_type = state
        .service_types
        .update(id, &input)
        .await?
        .ok_or_else(|| ApiError::not_found("Service type", id))?;

    Ok(ApiResponse::ok("Service type updated successfully", service_type))
}

pub async fn delete_service_type_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Path(id) = id?;
    if !state.service_types.delete(id).await? {
        return Err(ApiError::not_found("Service type", id));
    }

    info!("Deleted service type {}", id);
    Ok(ApiResponse::message("Service type deleted successfully"))
}

/// GET /api/services?service_type_id=
pub async fn list_services_handler(
    State(state): State<AppState>,
    Query(filter): Query<ServiceFilter>,
) -> Result<ApiResponse<Vec<Service>>, ApiError> {
    let services = state.services.list(filter.service_type_id).await?;
    Ok(ApiResponse::ok("Services retrieved successfully", services))
}

pub async fn get_service_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<Service>, ApiError> {
    let Path(id) = id?;
    let service = state
        .services
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Service", id))?;

    Ok(ApiResponse::ok("Service retrieved successfully", service))
}

/// Admins may touch any service; providers only their own
pub(crate) fn ensure_can_modify(user: &CurrentUser, service: &Service) -> Result<(), ApiError> {
    match user.role() {
        Role::Admin => Ok(()),
        Role::Provider if service.provider_id == Some(user.id()) => Ok(()),
        Role::Provider | Role::User => Err(ApiError::Forbidden(
            "You can only modify your own services".to_string(),
        )),
    }
}

fn check_price(price: &rust_decimal::Decimal) -> Result<(), ApiError> {
    validate_non_negative_price(price)
        .map_err(|_| ApiError::BadRequest("Price cannot be negative".to_string()))
}

/// POST /api/provider/services
pub async fn create_service_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<CreateService>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Service>>), ApiError> {
    let Json(input) = payload?;
    input.validate()?;
    check_price(&input.price)?;

    if state.service_types.find_by_id(input.service_type_id).await?.is_none() {
        return Err(ApiError::BadRequest(format!(
            "Service type {} does not exist",
            input.service_type_id
        )));
    }

    let owner = match user.role() {
        Role::Admin => input.provider_id,
        Role::Provider | Role::User => Some(user.id()),
    };

    let service = state.services.create(owner, &input).await?;
    info!("User {} created service {}", user.id(), service.id);

    Ok(ApiResponse::created("Service created successfully", service))
}

/// PUT /api/provider/services/{id}
pub async fn update_service_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateService>, JsonRejection>,
) -> Result<ApiResponse<Service>, ApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    input.validate()?;
    if let Some(price) = &input.price {
        check_price(price)?;
    }

    let existing = state
        .services
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Service", id))?;
    ensure_can_modify(&user, &existing)?;

    let service = state
        .services
        .update(id, &input)
        .await?
        .ok_or_else(|| ApiError::not_found("Service", id))?;

    info!("User {} updated service {}", user.id(), id);
    Ok(ApiResponse::ok("Service updated successfully", service))
}

/// DELETE /api/provider/services/{id}
pub async fn delete_service_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    id: Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Path(id) = id?;
    let existing = state
        .services
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Service", id))?;
    ensure_can_modify(&user, &existing)?;

    if !state.services.delete(id).await? {
        return Err(ApiError::not_found("Service", id));
    }

    info!("User {} deleted service {}", user.id(), id);
    Ok(ApiResponse::message("Service deleted successfully"))
}
