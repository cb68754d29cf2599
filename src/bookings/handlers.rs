// HTTP handlers for booking endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::auth::CurrentUser;
use crate::bookings::models::{Booking, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::AppState;

/// POST /api/bookings
pub async fn create_booking_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Booking>>), ApiError> {
    let Json(request) = payload?;
    let booking = state.bookings.create_booking(user.id(), request).await?;
    Ok(ApiResponse::created("Booking created successfully", booking))
}

/// GET /api/bookings
/// The caller's own bookings, whatever their role
pub async fn list_bookings_handler(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<ApiResponse<Vec<Booking>>, ApiError> {
    let bookings = state.bookings.user_bookings(user.id()).await?;
    Ok(ApiResponse::ok("Bookings retrieved successfully", bookings))
}

/// GET /api/bookings/{id}
pub async fn get_booking_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    id: Result<Path<i32>, PathRejection>,
) -> Result<ApiResponse<Booking>, ApiError> {
    let Path(id) = id?;
    let booking = state.bookings.booking_for(&user, id).await?;
    Ok(ApiResponse::ok("Booking retrieved successfully", booking))
}

/// PUT /api/admin/bookings/{id}/status
pub async fn update_booking_status_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateBookingStatusRequest>, JsonRejection>,
) -> Result<ApiResponse<Booking>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let booking = state.bookings.update_status(id, request.status).await?;
    Ok(ApiResponse::ok("Booking status updated successfully", booking))
}
