// Normalized pricing results and the query shapes the handlers accept

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Where a result list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Provider,
    /// Substituted sample data, only when explicitly enabled
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Flight {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub depart_date: String,
    pub return_date: String,
    pub price: f64,
    pub currency: String,
    pub airline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FlightSearchResult {
    pub flights: Vec<Flight>,
    pub source: ResultSource,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FlightQuery {
    /// Origin airport/city IATA code
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    /// YYYY-MM-DD or YYYY-MM
    #[serde(default)]
    pub depart_date: String,
    pub return_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HotelOffer {
    pub id: String,
    pub name: String,
    pub location: String,
    pub country: String,
    pub stars: f64,
    pub price_from: f64,
    pub price_avg: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HotelSearchResult {
    pub hotels: Vec<HotelOffer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HotelSearchQuery {
    #[serde(default)]
    pub destination: String,
    #[serde(default, rename = "checkIn")]
    pub check_in: String,
    #[serde(default, rename = "checkOut")]
    pub check_out: String,
    /// Anything missing, unparsable or non-positive means 2
    pub adults: Option<String>,
}

impl HotelSearchQuery {
    pub const DEFAULT_ADULTS: u32 = 2;

    pub fn adults(&self) -> u32 {
        self.adults
            .as_deref()
            .and_then(|a| a.trim().parse::<u32>().ok())
            .filter(|a| *a > 0)
            .unwrap_or(Self::DEFAULT_ADULTS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PopularHotel {
    pub id: String,
    pub name: String,
    pub stars: f64,
    pub rating: f64,
    pub price: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    City,
    Hotel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DestinationSuggestion {
    pub id: String,
    pub kind: SuggestionKind,
    pub name: String,
    pub full_name: String,
    pub country: String,
    pub hotels_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DestinationLookupQuery {
    #[serde(default)]
    pub query: String,
}
