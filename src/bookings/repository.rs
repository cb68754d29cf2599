use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::bookings::models::{Booking, BookingStatus};
use crate::error::ApiError;

const BOOKING_COLUMNS: &str = "id, user_id, service_id, booking_date_start, booking_date_end, total_price, status, created_at, updated_at";

/// Storage seam for bookings
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// New bookings always start out pending
    async fn create(
        &self,
        user_id: i32,
        service_id: i32,
        start: NaiveDate,
        end: NaiveDate,
        total_price: Decimal,
    ) -> Result<Booking, ApiError>;

    /// Most recent first
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Booking>, ApiError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Booking>, ApiError>;

    async fn update_status(&self, id: i32, status: BookingStatus) -> Result<Option<Booking>, ApiError>;
}

#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingRepository {
    async fn create(
        &self,
        user_id: i32,
        service_id: i32,
        start: NaiveDate,
        end: NaiveDate,
        total_price: Decimal,
    ) -> Result<Booking, ApiError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (user_id, service_id, booking_date_start, booking_date_end, total_price, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(user_id)
        .bind(service_id)
        .bind(start)
        .bind(end)
        .bind(total_price)
        .bind(BookingStatus::Pending)
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Booking>, ApiError> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {} FROM bookings WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
            BOOKING_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Booking>, ApiError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {} FROM bookings WHERE id = $1",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn update_status(&self, id: i32, status: BookingStatus) -> Result<Option<Booking>, ApiError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "UPDATE bookings SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }
}
