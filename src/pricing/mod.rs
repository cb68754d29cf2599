// Pricing module
// Wraps the external flight and hotel pricing provider and normalizes its
// inconsistent payloads into stable result types

pub mod client;
pub mod error;
pub mod handlers;
pub mod models;
pub mod normalize;

pub use client::PricingClient;
pub use error::PricingError;
pub use models::{Flight, FlightQuery, FlightSearchResult, HotelOffer, ResultSource};
