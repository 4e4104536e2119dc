use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::services::emission_factors::EmissionCategory;

/// One user's monthly activity. Absent fields are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageRecord {
    #[serde(alias = "flightMiles")]
    pub flight_miles: f64,
    #[serde(alias = "carMiles")]
    pub car_miles: f64,
    #[serde(alias = "foodDelivery", alias = "foodDeliveryCount")]
    pub food_delivery_count: f64,
    #[serde(alias = "rideShareMiles")]
    pub ride_share_miles: f64,
    #[serde(alias = "electricityUsage", alias = "electricityUsageKWh")]
    pub electricity_usage_kwh: f64,
}

impl UsageRecord {
    /// Activity amount recorded for a category
    pub fn amount(&self, category: EmissionCategory) -> f64 {
        match category {
            EmissionCategory::Flight => self.flight_miles,
            EmissionCategory::Car => self.car_miles,
            EmissionCategory::FoodDelivery => self.food_delivery_count,
            EmissionCategory::RideShare => self.ride_share_miles,
            EmissionCategory::Electricity => self.electricity_usage_kwh,
        }
    }
}

/// Raw form submission, before bounds checking
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageSubmission {
    #[serde(default, deserialize_with = "form_number", alias = "flightMiles")]
    pub flight_miles: Option<f64>,
    #[serde(default, deserialize_with = "form_number", alias = "carMiles")]
    pub car_miles: Option<f64>,
    #[serde(
        default,
        deserialize_with = "form_number",
        alias = "foodDelivery",
        alias = "foodDeliveryCount"
    )]
    pub food_delivery_count: Option<f64>,
    #[serde(default, deserialize_with = "form_number", alias = "rideShareMiles")]
    pub ride_share_miles: Option<f64>,
    #[serde(
        default,
        deserialize_with = "form_number",
        alias = "electricityUsage",
        alias = "electricityUsageKWh"
    )]
    pub electricity_usage_kwh: Option<f64>,
}

/// Coerces a form value like a number input does. Numeric strings are
/// parsed, blank strings and null are absent, anything else becomes NaN
/// and is reported by [`UsageSubmission::validate`].
fn form_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(n.as_f64().unwrap_or(f64::NAN)),
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.trim().parse::<f64>().unwrap_or(f64::NAN)),
        Some(_) => Some(f64::NAN),
    })
}

/// Inclusive input range for one form field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldBounds {
    pub field: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
}

/// Validation failure for a single field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

// (field, label, max). Presentation limits, not physical ones.
const FIELD_LIMITS: [(&str, &str, f64); 5] = [
    ("flight_miles", "Flight miles", 5000.0),
    ("car_miles", "Car miles", 2000.0),
    ("food_delivery_count", "Food delivery count", 30.0),
    ("ride_share_miles", "Ride share miles", 500.0),
    ("electricity_usage_kwh", "Electricity usage", 1000.0),
];

/// Per-field bounds enforced by [`UsageSubmission::validate`]
pub fn usage_bounds() -> Vec<FieldBounds> {
    FIELD_LIMITS
        .iter()
        .map(|(field, label, max)| FieldBounds {
            field: field.to_string(),
            label: label.to_string(),
            min: 0.0,
            max: *max,
        })
        .collect()
}

fn check_field(
    value: Option<f64>,
    (field, label, max): (&str, &str, f64),
    errors: &mut Vec<FieldError>,
) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };

    let message = if !value.is_finite() {
        Some(format!("{} must be a number", label))
    } else if value < 0.0 {
        Some(format!("{} cannot be negative", label))
    } else if value > max {
        Some(format!("{} cannot exceed {}", label, max))
    } else {
        None
    };

    match message {
        Some(message) => {
            errors.push(FieldError {
                field: field.to_string(),
                message,
            });
            0.0
        }
        None => value,
    }
}

impl UsageSubmission {
    /// Validates every field against its bounds.
    /// Returns all field errors, not just the first one.
    pub fn validate(&self) -> Result<UsageRecord, Vec<FieldError>> {
        let mut errors = Vec::new();

        let record = UsageRecord {
            flight_miles: check_field(self.flight_miles, FIELD_LIMITS[0], &mut errors),
            car_miles: check_field(self.car_miles, FIELD_LIMITS[1], &mut errors),
            food_delivery_count: check_field(self.food_delivery_count, FIELD_LIMITS[2], &mut errors),
            ride_share_miles: check_field(self.ride_share_miles, FIELD_LIMITS[3], &mut errors),
            electricity_usage_kwh: check_field(self.electricity_usage_kwh, FIELD_LIMITS[4], &mut errors),
        };

        if errors.is_empty() {
            Ok(record)
        } else {
            Err(errors)
        }
    }
}
