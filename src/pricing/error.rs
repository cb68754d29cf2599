use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::error::ErrorResponse;

/// Error types for calls to the external pricing provider
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("pricing provider API key is not configured")]
    ConfigError,

    #[error("unauthorized access, check the provider API key")]
    Unauthorized,

    #[error("rate limit exceeded, please try again later")]
    RateLimited,

    #[error("pricing provider error: {0}")]
    UpstreamError(String),
}

impl PricingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PricingError::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
            PricingError::Unauthorized => StatusCode::BAD_GATEWAY,
            PricingError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            PricingError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PricingError::ConfigError => "PRICING_NOT_CONFIGURED",
            PricingError::Unauthorized => "PRICING_UNAUTHORIZED",
            PricingError::RateLimited => "RATE_LIMITED",
            PricingError::UpstreamError(_) => "UPSTREAM_ERROR",
        }
    }

    /// Provider details stay in the logs
    pub fn error_message(&self) -> String {
        match self {
            PricingError::ConfigError => "Pricing service is not configured".to_string(),
            PricingError::Unauthorized => "Pricing provider rejected our credentials".to_string(),
            PricingError::RateLimited => "Rate limit exceeded, please try again later".to_string(),
            PricingError::UpstreamError(_) => "Failed to fetch prices from provider".to_string(),
        }
    }
}

impl IntoResponse for PricingError {
    fn into_response(self) -> Response {
        match &self {
            PricingError::ConfigError | PricingError::Unauthorized => error!("Pricing error: {}", self),
            PricingError::RateLimited | PricingError::UpstreamError(_) => warn!("Pricing error: {}", self),
        }

        ErrorResponse::new(self.error_message(), self.code()).into_response_with(self.status_code())
    }
}

impl From<reqwest::Error> for PricingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PricingError::UpstreamError("request timed out".to_string())
        } else {
            PricingError::UpstreamError(err.to_string())
        }
    }
}
