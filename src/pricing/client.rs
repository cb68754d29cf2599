use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::PricingConfig;
use crate::pricing::{
    error::PricingError,
    models::{
        DestinationSuggestion, FlightQuery, FlightSearchResult, HotelOffer, PopularHotel,
        ResultSource,
    },
    normalize,
};

const DEFAULT_CURRENCY: &str = "USD";
const HOTEL_RESULT_LIMIT: &str = "10";

/// HTTP client for the travel pricing provider
///
/// Every request carries the API key as both a `token` query parameter and
/// an `X-Access-Token` header; the provider's endpoints disagree about which
/// one they read.
#[derive(Clone)]
pub struct PricingClient {
    http: reqwest::Client,
    config: Arc<PricingConfig>,
}

impl PricingClient {
    pub fn new(config: PricingConfig) -> Result<Self, PricingError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PricingError::UpstreamError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, PricingError> {
        self.config.api_key.as_deref().ok_or(PricingError::ConfigError)
    }

    async fn get_json(&self, url: &str, params: &[(&str, &str)]) -> Result<Value, PricingError> {
        let key = self.api_key()?;

        debug!("Pricing request: {}", url);

        let response = self
            .http
            .get(url)
            .query(params)
            .query(&[("token", key)])
            .header("X-Access-Token", key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(PricingError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => return Err(PricingError::RateLimited),
            s if !s.is_success() => {
                let body = response.text().await.unwrap_or_default();
                warn!("Pricing provider returned {}: {}", s, body);
                return Err(PricingError::UpstreamError(format!("unexpected status {}", s.as_u16())));
            }
            _ => {}
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| PricingError::UpstreamError(format!("failed to decode response: {}", e)))
    }

    /// Cheapest fares for a route
    ///
    /// With placeholder fallback enabled, an empty result is replaced by
    /// sample flights marked as such. Provider errors always propagate.
    pub async fn search_flights(&self, query: &FlightQuery) -> Result<FlightSearchResult, PricingError> {
        let url = format!("{}/prices/cheap", self.config.flights_base_url);

        let mut params = vec![
            ("origin", query.origin.as_str()),
            ("destination", query.destination.as_str()),
            ("depart_date", query.depart_date.as_str()),
            ("currency", DEFAULT_CURRENCY),
        ];
        if let Some(return_date) = query.return_date.as_deref().filter(|d| !d.is_empty()) {
            params.push(("return_date", return_date));
        }

        let body = self.get_json(&url, &params).await?;
        let flights = normalize::normalize_flights(&body, query)?;

        if flights.is_empty() && self.config.placeholder_fallback {
            debug!("No flights returned, serving placeholder results");
            return Ok(FlightSearchResult {
                flights: normalize::placeholder_flights(query),
                source: ResultSource::Placeholder,
            });
        }

        Ok(FlightSearchResult {
            flights,
            source: ResultSource::Provider,
        })
    }

    /// Cached hotel prices for a destination and stay
    pub async fn search_hotels(
        &self,
        destination: &str,
        check_in: &str,
        check_out: &str,
        adults: u32,
    ) -> Result<Vec<HotelOffer>, PricingError> {
        let url = format!("{}/cache.json", self.config.hotels_base_url);
        let adults = adults.to_string();

        let body = self
            .get_json(
                &url,
                &[
                    ("location", destination),
                    ("checkIn", check_in),
                    ("checkOut", check_out),
                    ("adults", adults.as_str()),
                    ("currency", DEFAULT_CURRENCY),
                    ("limit", HOTEL_RESULT_LIMIT),
                ],
            )
            .await?;

        normalize::normalize_hotels(&body, DEFAULT_CURRENCY)
    }

    pub async fn popular_hotels(&self, city_id: &str) -> Result<Vec<PopularHotel>, PricingError> {
        let url = format!("{}/widget_location_dump.json", self.config.widgets_base_url);

        let body = self
            .get_json(
                &url,
                &[
                    ("id", city_id),
                    ("type", "popularity"),
                    ("currency", DEFAULT_CURRENCY),
                    ("language", "en"),
                ],
            )
            .await?;

        normalize::normalize_popular_hotels(&body)
    }

    /// Autocomplete for cities and hotels
    pub async fn destinations(&self, query: &str) -> Result<Vec<DestinationSuggestion>, PricingError> {
        let url = format!("{}/lookup.json", self.config.hotels_base_url);

        let body = self
            .get_json(&url, &[("query", query), ("lang", "en"), ("lookFor", "both"), ("limit", HOTEL_RESULT_LIMIT)])
            .await?;

        normalize::normalize_destinations(&body)
    }
}
