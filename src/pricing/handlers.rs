// HTTP handlers for flight and hotel price lookups
// All public; the provider key never leaves the server

use axum::extract::{Path, Query, State};
use tracing::debug;

use crate::error::ApiError;
use crate::pricing::models::{
    DestinationLookupQuery, DestinationSuggestion, FlightQuery, FlightSearchResult,
    HotelSearchQuery, HotelSearchResult, PopularHotel,
};
use crate::response::ApiResponse;
use crate::AppState;

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// GET /api/flights/search
#[utoipa::path(
    get,
    path = "/api/flights/search",
    params(FlightQuery),
    responses(
        (status = 200, description = "Normalized flight prices", body = FlightSearchResult),
        (status = 400, description = "Missing origin, destination or depart_date", body = crate::error::ErrorResponse),
        (status = 429, description = "Provider rate limit", body = crate::error::ErrorResponse),
        (status = 502, description = "Provider failure", body = crate::error::ErrorResponse)
    ),
    tag = "pricing"
)]
pub async fn search_flights_handler(
    State(state): State<AppState>,
    Query(query): Query<FlightQuery>,
) -> Result<ApiResponse<FlightSearchResult>, ApiError> {
    if blank(&query.origin) || blank(&query.destination) || blank(&query.depart_date) {
        return Err(ApiError::BadRequest(
            "Missing required parameters: origin, destination, and depart_date".to_string(),
        ));
    }

    debug!(
        "Flight search {} -> {} on {}",
        query.origin, query.destination, query.depart_date
    );

    let result = state.pricing.search_flights(&query).await?;
    Ok(ApiResponse::ok("Flights retrieved successfully", result))
}

/// GET /api/hotels/search?destination=&checkIn=&checkOut=&adults=
pub async fn search_hotels_handler(
    State(state): State<AppState>,
    Query(query): Query<HotelSearchQuery>,
) -> Result<ApiResponse<HotelSearchResult>, ApiError> {
    if blank(&query.destination) {
        return Err(ApiError::BadRequest("Destination is required".to_string()));
    }
    if blank(&query.check_in) {
        return Err(ApiError::BadRequest("Check-in date is required".to_string()));
    }
    if blank(&query.check_out) {
        return Err(ApiError::BadRequest("Check-out date is required".to_string()));
    }

    let hotels = state
        .pricing
        .search_hotels(&query.destination, &query.check_in, &query.check_out, query.adults())
        .await?;

    Ok(ApiResponse::ok(
        "Hotels retrieved successfully",
        HotelSearchResult { hotels },
    ))
}

/// GET /api/hotels/popular/:city_id
pub async fn popular_hotels_handler(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> Result<ApiResponse<Vec<PopularHotel>>, ApiError> {
    if blank(&city_id) {
        return Err(ApiError::BadRequest("City ID is required".to_string()));
    }

    let hotels = state.pricing.popular_hotels(city_id.trim()).await?;
    Ok(ApiResponse::ok("Popular hotels retrieved successfully", hotels))
}

/// GET /api/hotels/destinations?query=
pub async fn hotel_destinations_handler(
    State(state): State<AppState>,
    Query(lookup): Query<DestinationLookupQuery>,
) -> Result<ApiResponse<Vec<DestinationSuggestion>>, ApiError> {
    if blank(&lookup.query) {
        return Err(ApiError::BadRequest("Search query is required".to_string()));
    }

    let suggestions = state.pricing.destinations(lookup.query.trim()).await?;
    Ok(ApiResponse::ok("Destinations retrieved successfully", suggestions))
}
