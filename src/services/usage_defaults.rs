use serde::Deserialize;
use serde_json::Value;

use crate::models::{calculations::CalculatedEmissions, usage::UsageRecord};

/// Aggregation reports yearly flight distance, the form works per month
const MONTHS_PER_YEAR: f64 = 12.0;

const FOOD_DELIVERY_SOURCES: [&str; 2] = ["uber_eats", "doordash"];
const RIDE_SHARE_SOURCES: [&str; 2] = ["uber_rides", "lyft"];

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

fn shape_defaults(distance_of: impl Fn(&str) -> f64) -> UsageRecord {
    UsageRecord {
        flight_miles: distance_of("flights") / MONTHS_PER_YEAR,
        car_miles: 0.0,
        food_delivery_count: FOOD_DELIVERY_SOURCES.iter().map(|s| distance_of(*s)).sum(),
        ride_share_miles: RIDE_SHARE_SOURCES.iter().map(|s| distance_of(*s)).sum(),
        electricity_usage_kwh: 0.0,
    }
}

/// Reshape a categorized aggregation result into form defaults.
///
/// Car and electricity have no backend category and stay at 0.
pub fn usage_defaults(calculated: &CalculatedEmissions) -> UsageRecord {
    shape_defaults(|source| {
        calculated
            .categories
            .get(source)
            .map(|c| sanitize(c.distance))
            .unwrap_or(0.0)
    })
}

/// Locate the object holding `categories` in a payload that may be bare,
/// wrapped once in `{ message, data }`, or wrapped twice by the proxy.
fn find_envelope(payload: &Value) -> Option<&Value> {
    let mut current = payload;
    for _ in 0..3 {
        if current.get("categories").is_some() {
            return Some(current);
        }
        current = current.get("data")?;
    }
    None
}

/// Lenient variant of [`usage_defaults`] over raw JSON.
///
/// Well-formed results go through the typed adapter. Otherwise each
/// category is read independently, so a malformed entry only zeroes
/// itself. Never fails.
pub fn usage_defaults_from_value(payload: &Value) -> UsageRecord {
    let Some(envelope) = find_envelope(payload) else {
        tracing::warn!("Aggregation payload has no categories, using zero defaults");
        return UsageRecord::default();
    };

    match CalculatedEmissions::deserialize(envelope) {
        Ok(calculated) => return usage_defaults(&calculated),
        Err(e) => tracing::debug!("Reading aggregation categories leniently: {}", e),
    }

    let Some(categories) = envelope.get("categories").and_then(Value::as_object) else {
        tracing::warn!("Aggregation categories are not an object, using zero defaults");
        return UsageRecord::default();
    };

    shape_defaults(|source| {
        categories
            .get(source)
            .and_then(|c| c.get("distance"))
            .and_then(Value::as_f64)
            .map(sanitize)
            .unwrap_or(0.0)
    })
}
