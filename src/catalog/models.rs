use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A travel destination shown in the public catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Destination {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Zanzibar Beaches")]
    pub name: String,
    #[schema(example = "Tanzania")]
    pub country: String,
    #[schema(example = "Stone Town")]
    pub city: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[schema(example = 4.8, minimum = 0.0, maximum = 5.0)]
    pub rating: f64,
    #[schema(example = 12)]
    pub deals_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDestination {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Defaults to 0
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,
    #[validate(range(min = 0, message = "Deals count cannot be negative"))]
    pub deals_count: Option<i32>,
}

/// Partial update; absent fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateDestination {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Country cannot be empty"))]
    pub country: Option<String>,
    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,
    #[validate(range(min = 0, message = "Deals count cannot be negative"))]
    pub deals_count: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ServiceType {
    pub id: i32,
    #[schema(example = "Guided Tour")]
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ServiceTypeInput {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
    pub description: Option<String>,
}

/// A bookable offering such as a tour, transfer or stay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Service {
    pub id: i32,
    /// Owning provider; null for services created by an admin without one
    pub provider_id: Option<i32>,
    pub service_type_id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "120.00")]
    pub price: Decimal,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateService {
    pub service_type_id: i32,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    /// Defaults to true
    pub availability: Option<bool>,
    /// Only honoured for admins; providers always own what they create
    pub provider_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateService {
    pub service_type_id: Option<i32>,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub availability: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServiceFilter {
    pub service_type_id: Option<i32>,
}
