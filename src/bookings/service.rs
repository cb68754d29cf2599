use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::{CurrentUser, Role};
use crate::bookings::{
    models::{Booking, BookingStatus, CreateBookingRequest},
    repository::BookingStore,
    status_machine::StatusMachine,
};
use crate::catalog::ServiceStore;
use crate::error::ApiError;
use crate::validation::validate_date_order;

/// Nights between the two dates, never fewer than one
pub fn nights(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().max(1)
}

/// Total for a stay: nightly price × nights
pub fn quote_total(price: Decimal, start: NaiveDate, end: NaiveDate) -> Result<Decimal, ApiError> {
    validate_date_order(start, end).map_err(|_| {
        ApiError::BadRequest("booking_date_end must not be before booking_date_start".to_string())
    })?;

    Ok(price * Decimal::from(nights(start, end)))
}

#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingStore>,
    services: Arc<dyn ServiceStore>,
}

impl BookingService {
    pub fn new(bookings: Arc<dyn BookingStore>, services: Arc<dyn ServiceStore>) -> Self {
        Self { bookings, services }
    }

    pub async fn create_booking(
        &self,
        user_id: i32,
        request: CreateBookingRequest,
    ) -> Result<Booking, ApiError> {
        let service = self
            .services
            .find_by_id(request.service_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Service", request.service_id))?;

        if !service.availability {
            return Err(ApiError::BadRequest(format!(
                "Service {} is not available for booking",
                service.id
            )));
        }

        let total = quote_total(service.price, request.booking_date_start, request.booking_date_end)?;

        let booking = self
            .bookings
            .create(
                user_id,
                service.id,
                request.booking_date_start,
                request.booking_date_end,
                total,
            )
            .await?;

        info!("User {} booked service {} (booking {}, total {})", user_id, service.id, booking.id, total);
        Ok(booking)
    }

    pub async fn user_bookings(&self, user_id: i32) -> Result<Vec<Booking>, ApiError> {
        let bookings = self.bookings.find_by_user(user_id).await?;
        debug!("User {} has {} bookings", user_id, bookings.len());
        Ok(bookings)
    }

    /// Someone else's booking looks exactly like a missing one
    pub async fn booking_for(&self, user: &CurrentUser, id: i32) -> Result<Booking, ApiError> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Booking", id))?;

        if can_view(user, &booking) {
            Ok(booking)
        } else {
            Err(ApiError::not_found("Booking", id))
        }
    }

    pub async fn update_status(&self, id: i32, status: BookingStatus) -> Result<Booking, ApiError> {
        let current = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Booking", id))?;

        StatusMachine::transition(current.status, status).map_err(ApiError::BadRequest)?;

        let booking = self
            .bookings
            .update_status(id, status)
            .await?
            .ok_or_else(|| ApiError::not_found("Booking", id))?;

        info!("Booking {} moved from {} to {}", id, current.status, status);
        Ok(booking)
    }
}

pub(crate) fn can_view(user: &CurrentUser, booking: &Booking) -> bool {
    match user.role() {
        Role::Admin => true,
        Role::User | Role::Provider => booking.user_id == user.id(),
    }
}
