pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod notifications;
pub mod pricing;
pub mod response;
pub mod users;
pub mod validation;

#[cfg(test)]
pub mod testing;

#[cfg(test)]
mod tests;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{require_role, AuthService, PgUserRepository, RequireRole, TokenService, UserStore};
use crate::bookings::{BookingService, PgBookingRepository};
use crate::catalog::{
    DestinationStore, PgDestinationRepository, PgServiceRepository, ServiceStore, ServiceTypeRepository,
};
use crate::config::AppConfig;
use crate::notifications::Mailer;
use crate::pricing::{PricingClient, PricingError};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::register_handler,
        auth::handlers::login_handler,
        auth::handlers::verify_email_handler,
        auth::handlers::resend_verification_handler,
        catalog::handlers::list_destinations_handler,
        catalog::handlers::get_destination_handler,
        catalog::handlers::create_destination_handler,
        catalog::handlers::update_destination_handler,
        catalog::handlers::delete_destination_handler,
        pricing::handlers::search_flights_handler,
    ),
    components(schemas(
        auth::models::RegisterRequest,
        auth::models::LoginRequest,
        auth::models::VerifyEmailRequest,
        auth::models::ResendVerificationRequest,
        auth::models::AuthPayload,
        auth::models::UserResponse,
        auth::models::Role,
        error::ErrorResponse,
        catalog::models::Destination,
        catalog::models::CreateDestination,
        catalog::models::UpdateDestination,
        pricing::models::Flight,
        pricing::models::FlightSearchResult,
        pricing::models::ResultSource,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and email verification"),
        (name = "destinations", description = "Destination catalog"),
        (name = "pricing", description = "Live flight and hotel prices")
    ),
    info(
        title = "Nomado API",
        version = "1.0.0",
        description = "Travel booking backend: accounts, catalog, bookings and live prices"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub auth: AuthService,
    pub destinations: Arc<dyn DestinationStore>,
    pub service_types: ServiceTypeRepository,
    pub services: Arc<dyn ServiceStore>,
    pub bookings: BookingService,
    pub pricing: PricingClient,
}

impl AppState {
    /// Wire PostgreSQL-backed stores around one pool
    pub fn new(pool: PgPool, config: &AppConfig, mailer: Arc<dyn Mailer>) -> Result<Self, PricingError> {
        let users: Arc<dyn UserStore> = Arc::new(PgUserRepository::new(pool.clone()));
        let tokens = TokenService::new(config.jwt.secret.clone(), config.jwt.ttl_seconds);
        let services: Arc<dyn ServiceStore> = Arc::new(PgServiceRepository::new(pool.clone()));

        Ok(Self {
            auth: AuthService::new(users.clone(), mailer, tokens),
            users,
            destinations: Arc::new(PgDestinationRepository::new(pool.clone())),
            service_types: ServiceTypeRepository::new(pool.clone()),
            bookings: BookingService::new(Arc::new(PgBookingRepository::new(pool)), services.clone()),
            services,
            pricing: PricingClient::new(config.pricing.clone())?,
        })
    }

    fn gate(&self, preset: fn(AuthService, Arc<dyn UserStore>) -> RequireRole) -> RequireRole {
        preset(self.auth.clone(), self.users.clone())
    }
}

/// Creates and configures the application router
///
/// Route groups share a role gate: public, any signed-in user, admin or
/// provider, and admin only.
pub fn create_router(state: AppState) -> Router {
    use auth::handlers as auth_h;
    use bookings::handlers as booking_h;
    use catalog::handlers as catalog_h;
    use pricing::handlers as pricing_h;
    use users::handlers as user_h;

    let public = Router::new()
        .route("/api/auth/register", post(auth_h::register_handler))
        .route("/api/auth/login", post(auth_h::login_handler))
        .route("/api/auth/verify-email", post(auth_h::verify_email_handler))
        .route("/api/auth/resend-verification", post(auth_h::resend_verification_handler))
        .route("/api/destinations", get(catalog_h::list_destinations_handler))
        .route("/api/destinations/:id", get(catalog_h::get_destination_handler))
        .route("/api/service-types", get(catalog_h::list_service_types_handler))
        .route("/api/service-types/:id", get(catalog_h::get_service_type_handler))
        .route("/api/services", get(catalog_h::list_services_handler))
        .route("/api/services/:id", get(catalog_h::get_service_handler))
        .route("/api/flights/search", get(pricing_h::search_flights_handler))
        .route("/api/hotels/search", get(pricing_h::search_hotels_handler))
        .route("/api/hotels/popular/:city_id", get(pricing_h::popular_hotels_handler))
        .route("/api/hotels/destinations", get(pricing_h::hotel_destinations_handler));

    let signed_in = Router::new()
        .route("/api/auth/me", get(auth_h::me_handler))
        .route(
            "/api/profile",
            get(user_h::get_profile_handler).put(user_h::update_profile_handler),
        )
        .route(
            "/api/bookings",
            get(booking_h::list_bookings_handler).post(booking_h::create_booking_handler),
        )
        .route("/api/bookings/:id", get(booking_h::get_booking_handler))
        .route_layer(from_fn_with_state(state.gate(RequireRole::any), require_role));

    let providers = Router::new()
        .route("/api/provider/services", post(catalog_h::create_service_handler))
        .route(
            "/api/provider/services/:id",
            put(catalog_h::update_service_handler).delete(catalog_h::delete_service_handler),
        )
        .route_layer(from_fn_with_state(
            state.gate(RequireRole::admin_or_provider),
            require_role,
        ));

    let admin = Router::new()
        .route("/api/admin/destinations", post(catalog_h::create_destination_handler))
        .route(
            "/api/admin/destinations/:id",
            put(catalog_h::update_destination_handler).delete(catalog_h::delete_destination_handler),
        )
        .route("/api/admin/service-types", post(catalog_h::create_service_type_handler))
        .route(
            "/api/admin/service-types/:id",
            put(catalog_h::update_service_type_handler).delete(catalog_h::delete_service_type_handler),
        )
        .route(
            "/api/admin/bookings/:id/status",
            put(booking_h::update_booking_status_handler),
        )
        .route("/api/admin/users", get(user_h::list_users_handler))
        .route("/api/admin/users/role/:role", get(user_h::list_users_by_role_handler))
        .route("/api/admin/users/:id/role", put(user_h::update_user_role_handler))
        .route(
            "/api/admin/users/:id",
            axum::routing::delete(user_h::delete_user_handler),
        )
        .route_layer(from_fn_with_state(state.gate(RequireRole::admin), require_role));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public)
        .merge(signed_in)
        .merge(providers)
        .merge(admin)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
