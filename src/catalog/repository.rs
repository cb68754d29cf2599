use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::catalog::models::{
    CreateDestination, CreateService, Destination, Service, ServiceType, ServiceTypeInput,
    UpdateDestination, UpdateService,
};
use crate::error::ApiError;

const DESTINATION_COLUMNS: &str =
    "id, name, country, city, description, image_url, rating, deals_count, created_at, updated_at";
const SERVICE_TYPE_COLUMNS: &str = "id, name, description, created_at, updated_at";
const SERVICE_COLUMNS: &str =
    "id, provider_id, service_type_id, name, description, price, availability, created_at, updated_at";

/// Storage seam for destinations so handlers can run without PostgreSQL
#[async_trait]
pub trait DestinationStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Destination>, ApiError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Destination>, ApiError>;

    async fn create(&self, input: &CreateDestination) -> Result<Destination, ApiError>;

    /// `None` when no destination has that id
    async fn update(&self, id: i32, input: &UpdateDestination) -> Result<Option<Destination>, ApiError>;

    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

#[derive(Clone)]
pub struct PgDestinationRepository {
    pool: PgPool,
}

impl PgDestinationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DestinationStore for PgDestinationRepository {
    async fn list(&self) -> Result<Vec<Destination>, ApiError> {
        let destinations = sqlx::query_as::<_, Destination>(&format!(
            "SELECT {} FROM destinations ORDER BY rating DESC, id",
            DESTINATION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} destinations", destinations.len());
        Ok(destinations)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Destination>, ApiError> {
        let destination = sqlx::query_as::<_, Destination>(&format!(
            "SELECT {} FROM destinations WHERE id = $1",
            DESTINATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(destination)
    }

    async fn create(&self, input: &CreateDestination) -> Result<Destination, ApiError> {
        let destination = sqlx::query_as::<_, Destination>(&format!(
            r#"
            INSERT INTO destinations (name, country, city, description, image_url, rating, deals_count)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0), COALESCE($7, 0))
            RETURNING {}
            "#,
            DESTINATION_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.country)
        .bind(&input.city)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.rating)
        .bind(input.deals_count)
        .fetch_one(&self.pool)
        .await?;

        Ok(destination)
    }

    async fn update(&self, id: i32, input: &UpdateDestination) -> Result<Option<Destination>, ApiError> {
        let destination = sqlx::query_as::<_, Destination>(&format!(
            r#"
            UPDATE destinations SET
                name = COALESCE($2, name),
                country = COALESCE($3, country),
                city = COALESCE($4, city),
                description = COALESCE($5, description),
                image_url = COALESCE($6, image_url),
                rating = COALESCE($7, rating),
                deals_count = COALESCE($8, deals_count),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            DESTINATION_COLUMNS
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.country)
        .bind(&input.city)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.rating)
        .bind(input.deals_count)
        .fetch_optional(&self.pool)
        .await?;

        Ok(destination)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM destinations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn constraint_error(err: sqlx::Error, unique: &str, foreign_key: &str) -> ApiError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return ApiError::BadRequest(unique.to_string());
        }
        if db_err.is_foreign_key_violation() {
            return ApiError::BadRequest(foreign_key.to_string());
        }
    }
    ApiError::DatabaseError(err)
}

#[derive(Clone)]
pub struct ServiceTypeRepository {
    pool: PgPool,
}

impl ServiceTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<ServiceType>, ApiError> {
        let types = sqlx::query_as::<_, ServiceType>(&format!(
            "SELECT {} FROM service_types ORDER BY name",
            SERVICE_TYPE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<ServiceType>, ApiError> {
        let service_type = sqlx::query_as::<_, ServiceType>(&format!(
            "SELECT {} FROM service_types WHERE id = $1",
            SERVICE_TYPE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service_type)
    }

    pub async fn create(&self, input: &ServiceTypeInput) -> Result<ServiceType, ApiError> {
        let created = sqlx::query_as::<_, ServiceType>(&format!(
            "INSERT INTO service_types (name, description) VALUES ($1, $2) RETURNING {}",
            SERVICE_TYPE_COLUMNS
        ))
        .bind(input.name.trim())
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await;

        created.map_err(|e| constraint_error(e, "Service type name already exists", "Invalid reference"))
    }

    pub async fn update(&self, id: i32, input: &ServiceTypeInput) -> Result<Option<ServiceType>, ApiError> {
        let updated = sqlx::query_as::<_, ServiceType>(&format!(
            r#"
            UPDATE service_types SET name = $2, description = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SERVICE_TYPE_COLUMNS
        ))
        .bind(id)
        .bind(input.name.trim())
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await;

        updated.map_err(|e| constraint_error(e, "Service type name already exists", "Invalid reference"))
    }

    /// Fails while services still reference the type
    pub async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM service_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;

        result
            .map(|r| r.rows_affected() > 0)
            .map_err(|e| constraint_error(e, "Service type name already exists", "Service type is still in use by services"))
    }
}

/// Storage seam for bookable services, shared by the catalog and bookings
#[async_trait]
pub trait ServiceStore: Send + Sync {
    /// All services, optionally narrowed to one service type
    async fn list(&self, service_type_id: Option<i32>) -> Result<Vec<Service>, ApiError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Service>, ApiError>;

    async fn create(&self, provider_id: Option<i32>, input: &CreateService) -> Result<Service, ApiError>;

    async fn update(&self, id: i32, input: &UpdateService) -> Result<Option<Service>, ApiError>;

    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

#[derive(Clone)]
pub struct PgServiceRepository {
    pool: PgPool,
}

impl PgServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceStore for PgServiceRepository {
    async fn list(&self, service_type_id: Option<i32>) -> Result<Vec<Service>, ApiError> {
        let services = sqlx::query_as::<_, Service>(&format!(
            r#"
            SELECT {} FROM services
            WHERE ($1::INT IS NULL OR service_type_id = $1)
            ORDER BY id
            "#,
            SERVICE_COLUMNS
        ))
        .bind(service_type_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Service>, ApiError> {
        let service = sqlx::query_as::<_, Service>(&format!(
            "SELECT {} FROM services WHERE id = $1",
            SERVICE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    async fn create(&self, provider_id: Option<i32>, input: &CreateService) -> Result<Service, ApiError> {
        let created = sqlx::query_as::<_, Service>(&format!(
            r#"
            INSERT INTO services (provider_id, service_type_id, name, description, price, availability)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, TRUE))
            RETURNING {}
            "#,
            SERVICE_COLUMNS
        ))
        .bind(provider_id)
        .bind(input.service_type_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.availability)
        .fetch_one(&self.pool)
        .await;

        created.map_err(|e| constraint_error(e, "Service already exists", "Unknown service type or provider"))
    }

    async fn update(&self, id: i32, input: &UpdateService) -> Result<Option<Service>, ApiError> {
        let updated = sqlx::query_as::<_, Service>(&format!(
            r#"
            UPDATE services SET
                service_type_id = COALESCE($2, service_type_id),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                availability = COALESCE($6, availability),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SERVICE_COLUMNS
        ))
        .bind(id)
        .bind(input.service_type_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.availability)
        .fetch_optional(&self.pool)
        .await;

        updated.map_err(|e| constraint_error(e, "Service already exists", "Unknown service type"))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;

        result
            .map(|r| r.rows_affected() > 0)
            .map_err(|e| constraint_error(e, "Service already exists", "Service has bookings and cannot be deleted"))
    }
}
