// Defensive normalization of provider payloads
//
// The provider is inconsistent about where entries live and how values are
// typed, so everything here works on `serde_json::Value` and inspects shape at
// runtime. Field lookups walk a fallback chain of names; values may arrive as
// numbers, numeric strings or not at all.

use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::pricing::{
    error::PricingError,
    models::{DestinationSuggestion, Flight, FlightQuery, HotelOffer, PopularHotel, SuggestionKind},
};

const DEFAULT_CURRENCY: &str = "USD";

const ID_KEYS: &[&str] = &["id", "key"];
const ORIGIN_KEYS: &[&str] = &["origin", "origin_code"];
const DESTINATION_KEYS: &[&str] = &["destination", "destination_code"];
const DEPART_KEYS: &[&str] = &["depart_date", "departure_at"];
const RETURN_KEYS: &[&str] = &["return_date", "return_at"];
const PRICE_KEYS: &[&str] = &["price", "value"];
const AIRLINE_KEYS: &[&str] = &["airline", "airline_code"];

/// First non-empty value in the chain, rendered as text
pub(crate) fn text(obj: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| match obj.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        })
        .next()
        .unwrap_or_default()
}

/// Number or numeric string; absent and unparsable values are zero
pub(crate) fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// First non-zero number in the chain
pub(crate) fn number(obj: &Map<String, Value>, keys: &[&str]) -> f64 {
    keys.iter()
        .map(|key| coerce_number(obj.get(*key)))
        .find(|n| *n != 0.0)
        .unwrap_or(0.0)
}

/// `null`, `""` and `false` all mean "no error"
fn provider_error(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

fn looks_like_flight(obj: &Map<String, Value>) -> bool {
    PRICE_KEYS.iter().any(|k| obj.contains_key(*k))
}

/// Extract flights from any of the shapes the provider returns
///
/// * `data` as an array of entries
/// * `data` as a map keyed by date or route whose values are entries, arrays
///   of entries, or further maps; the key path becomes the id when an entry
///   has none
/// * no `data` at all, in which case the root object is one flat entry
///
/// Entries missing origin or destination take the requested codes. Entries
/// without a positive price are dropped.
pub fn normalize_flights(body: &Value, query: &FlightQuery) -> Result<Vec<Flight>, PricingError> {
    let root = body
        .as_object()
        .ok_or_else(|| PricingError::UpstreamError("unexpected response format: not a JSON object".to_string()))?;

    if let Some(message) = provider_error(root) {
        return Err(PricingError::UpstreamError(format!("API returned an error: {}", message)));
    }

    let root_currency = text(root, &["currency"]);
    let parse = |entry: &Map<String, Value>, fallback_id: Option<&str>| {
        parse_flight(entry, fallback_id, query, &root_currency)
    };

    let mut flights = Vec::new();
    match root.get("data") {
        Some(Value::Array(items)) => {
            flights.extend(items.iter().filter_map(Value::as_object).filter_map(|e| parse(e, None)));
        }
        Some(Value::Object(keyed)) => collect_keyed(keyed, None, &parse, &mut flights),
        Some(Value::Null) | None => {
            if !root.is_empty() {
                flights.extend(parse(root, None));
            }
        }
        Some(_) => {}
    }

    Ok(flights)
}

fn collect_keyed<F>(map: &Map<String, Value>, prefix: Option<&str>, parse: &F, out: &mut Vec<Flight>)
where
    F: Fn(&Map<String, Value>, Option<&str>) -> Option<Flight>,
{
    for (key, value) in map {
        let key_path = match prefix {
            Some(prefix) => format!("{}-{}", prefix, key),
            None => key.clone(),
        };
        match value {
            Value::Object(entry) if looks_like_flight(entry) => out.extend(parse(entry, Some(&key_path))),
            Value::Object(nested) => collect_keyed(nested, Some(&key_path), parse, out),
            Value::Array(items) => {
                out.extend(items.iter().filter_map(Value::as_object).filter_map(|e| parse(e, Some(&key_path))))
            }
            _ => {}
        }
    }
}

fn parse_flight(
    entry: &Map<String, Value>,
    fallback_id: Option<&str>,
    query: &FlightQuery,
    root_currency: &str,
) -> Option<Flight> {
    let price = number(entry, PRICE_KEYS);
    if price <= 0.0 {
        return None;
    }

    let or_else = |value: String, fallback: &str| if value.is_empty() { fallback.to_string() } else { value };

    let id = or_else(text(entry, ID_KEYS), fallback_id.unwrap_or_default());
    let currency = or_else(text(entry, &["currency"]), root_currency);

    Some(Flight {
        id,
        origin: or_else(text(entry, ORIGIN_KEYS), &query.origin).to_uppercase(),
        destination: or_else(text(entry, DESTINATION_KEYS), &query.destination).to_uppercase(),
        depart_date: or_else(text(entry, DEPART_KEYS), &query.depart_date),
        return_date: or_else(text(entry, RETURN_KEYS), query.return_date.as_deref().unwrap_or_default()),
        price,
        currency: or_else(currency, DEFAULT_CURRENCY).to_uppercase(),
        airline: text(entry, AIRLINE_KEYS),
    })
}

/// Sample flights returned only when placeholder fallback is switched on
pub fn placeholder_flights(query: &FlightQuery) -> Vec<Flight> {
    let sample = |id: &str, price: f64, airline: &str| Flight {
        id: id.to_string(),
        origin: query.origin.to_uppercase(),
        destination: query.destination.to_uppercase(),
        depart_date: query.depart_date.clone(),
        return_date: query.return_date.clone().unwrap_or_default(),
        price,
        currency: DEFAULT_CURRENCY.to_string(),
        airline: airline.to_string(),
    };
    vec![
        sample("test-1", 299.99, "Test Airlines"),
        sample("test-2", 449.50, "Mock Airways"),
    ]
}

/// Hotel search accepts a bare array or an object carrying one under
/// `hotels`, `data` or `results`
pub fn normalize_hotels(body: &Value, currency: &str) -> Result<Vec<HotelOffer>, PricingError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(root) => {
            if let Some(message) = provider_error(root) {
                return Err(PricingError::UpstreamError(format!("API returned an error: {}", message)));
            }
            if root.get("status").and_then(Value::as_str) == Some("error") {
                let message = text(root, &["message"]);
                return Err(PricingError::UpstreamError(format!("API returned an error: {}", message)));
            }
            match ["hotels", "data", "results"]
                .iter()
                .find_map(|k| root.get(*k).and_then(Value::as_array))
            {
                Some(items) => items,
                None => return Ok(Vec::new()),
            }
        }
        _ => {
            return Err(PricingError::UpstreamError(
                "unexpected response format for hotel search".to_string(),
            ))
        }
    };

    Ok(items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|entry| parse_hotel(entry, currency))
        .collect())
}

fn parse_hotel(entry: &Map<String, Value>, currency: &str) -> Option<HotelOffer> {
    let name = text(entry, &["hotelName", "name", "label"]);
    if name.is_empty() {
        return None;
    }

    let (location, country) = match entry.get("location").and_then(Value::as_object) {
        Some(loc) => (text(loc, &["name", "cityName"]), text(loc, &["country", "countryName"])),
        None => (
            text(entry, &["locationName", "location", "city"]),
            text(entry, &["country", "countryName"]),
        ),
    };

    Some(HotelOffer {
        id: text(entry, &["hotelId", "id", "hotel_id"]),
        name,
        location,
        country,
        stars: number(entry, &["stars"]),
        price_from: number(entry, &["priceFrom", "price_from", "minPrice", "price"]),
        price_avg: number(entry, &["priceAvg", "price_avg"]),
        currency: currency.to_uppercase(),
    })
}

/// Every array among the root's values is flattened; duplicates across
/// categories are kept once, first occurrence wins
pub fn normalize_popular_hotels(body: &Value) -> Result<Vec<PopularHotel>, PricingError> {
    let root = body.as_object().ok_or_else(|| {
        PricingError::UpstreamError("unexpected response format for popular hotels".to_string())
    })?;

    if let Some(message) = provider_error(root) {
        return Err(PricingError::UpstreamError(format!("API returned an error: {}", message)));
    }

    let mut seen = HashSet::new();
    let hotels = root
        .values()
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(Value::as_object)
        .filter_map(parse_popular_hotel)
        .filter(|hotel| hotel.id.is_empty() || seen.insert(hotel.id.clone()))
        .collect();

    Ok(hotels)
}

fn parse_popular_hotel(entry: &Map<String, Value>) -> Option<PopularHotel> {
    let name = text(entry, &["name", "hotelName", "label"]);
    if name.is_empty() {
        return None;
    }

    let mut price = number(entry, &["price", "priceFrom", "last_price"]);
    if price == 0.0 {
        if let Some(info) = entry.get("last_price_info").and_then(Value::as_object) {
            price = number(info, &["price", "price_pn"]);
        }
    }

    Some(PopularHotel {
        id: text(entry, &["hotel_id", "id", "hotelId"]),
        name,
        stars: number(entry, &["stars"]),
        rating: number(entry, &["rating", "guest_score"]),
        price,
        distance: number(entry, &["distance"]),
    })
}

/// Lookup results carry `locations` and `hotels` under `results`
/// (or at the root); both are merged into one suggestion list
pub fn normalize_destinations(body: &Value) -> Result<Vec<DestinationSuggestion>, PricingError> {
    let root = body.as_object().ok_or_else(|| {
        PricingError::UpstreamError("unexpected response format for destination lookup".to_string())
    })?;

    if let Some(message) = provider_error(root) {
        return Err(PricingError::UpstreamError(format!("API returned an error: {}", message)));
    }

    let results = root.get("results").and_then(Value::as_object).unwrap_or(root);
    let entries = |key: &str| {
        results
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_object).collect::<Vec<_>>())
            .unwrap_or_default()
    };

    let cities = entries("locations").into_iter().filter_map(|loc| {
        let name = text(loc, &["cityName", "name", "fullName"]);
        (!name.is_empty()).then(|| DestinationSuggestion {
            id: text(loc, &["id", "locationId"]),
            kind: SuggestionKind::City,
            full_name: text(loc, &["fullName", "name", "cityName"]),
            name,
            country: text(loc, &["countryName", "country", "countryCode"]),
            hotels_count: number(loc, &["hotelsCount", "hotels_count"]) as i64,
        })
    });

    let hotels = entries("hotels").into_iter().filter_map(|hotel| {
        let name = text(hotel, &["label", "name", "fullName"]);
        (!name.is_empty()).then(|| DestinationSuggestion {
            id: text(hotel, &["id", "hotelId"]),
            kind: SuggestionKind::Hotel,
            full_name: text(hotel, &["fullName", "label", "name"]),
            name,
            country: text(hotel, &["countryName", "country", "locationName"]),
            hotels_count: 0,
        })
    });

    Ok(cities.chain(hotels).collect())
}
