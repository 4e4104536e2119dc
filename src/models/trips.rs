use serde::{Deserialize, Deserializer, Serialize};

/// Raw trip history grouped by source, as mined from receipts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripLog {
    #[serde(default, deserialize_with = "one_or_many")]
    pub uber_rides: Vec<RideEntry>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub lyft: Vec<RideEntry>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub uber_eats: Vec<DeliveryEntry>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub doordash: Vec<DeliveryEntry>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub flights: Vec<FlightEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RideEntry {
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub time: Option<TripDuration>,
}

impl RideEntry {
    pub fn is_empty(&self) -> bool {
        self.distance.is_none() && self.time.is_none()
    }
}

/// Ride duration: minutes as a number, or text like "1 hour 5 minutes"
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TripDuration {
    Minutes(f64),
    Text(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryEntry {
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default, alias = "ordered_from")]
    pub restaurant: Option<String>,
    #[serde(default, alias = "address")]
    pub delivery_address: Option<String>,
}

impl DeliveryEntry {
    pub fn is_empty(&self) -> bool {
        self.distance.is_none() && self.restaurant.is_none() && self.delivery_address.is_none()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightEntry {
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub airport_a: Option<String>,
    #[serde(default)]
    pub airport_b: Option<String>,
    #[serde(default)]
    pub from: Option<Coordinates>,
    #[serde(default)]
    pub to: Option<Coordinates>,
}

impl FlightEntry {
    pub fn is_empty(&self) -> bool {
        self.distance.is_none()
            && self.airport_a.is_none()
            && self.airport_b.is_none()
            && self.from.is_none()
            && self.to.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    #[serde(alias = "lon")]
    pub lng: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<Option<T>>),
    One(T),
}

/// Accepts a list, a single object, or null. Null list items are skipped;
/// empty `{}` entries are kept here and skipped when scoring.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<OneOrMany<T>> = Option::deserialize(deserializer)?;
    Ok(match value {
        None => Vec::new(),
        Some(OneOrMany::Many(items)) => items.into_iter().flatten().collect(),
        Some(OneOrMany::One(item)) => vec![item],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_object_accepted_as_list() {
        let log: TripLog = serde_json::from_str(
            r#"{"lyft": {"distance": 12.3, "time": "30 minutes"}}"#,
        )
        .unwrap();
        assert_eq!(log.lyft.len(), 1);
        assert_eq!(log.lyft[0].distance, Some(12.3));
        assert_eq!(
            log.lyft[0].time,
            Some(TripDuration::Text("30 minutes".to_string()))
        );
        assert!(log.uber_rides.is_empty());
    }

    #[test]
    fn test_null_items_and_null_lists_skipped() {
        let log: TripLog = serde_json::from_str(
            r#"{"uber_rides": [null, {"distance": 5.2, "time": 15}], "flights": null}"#,
        )
        .unwrap();
        assert_eq!(log.uber_rides.len(), 1);
        assert_eq!(log.uber_rides[0].time, Some(TripDuration::Minutes(15.0)));
        assert!(log.flights.is_empty());
    }

    #[test]
    fn test_delivery_legacy_field_names() {
        let log: TripLog = serde_json::from_str(
            r#"{"doordash": [{"ordered_from": "Faneuil Hall", "address": "Harvard University"}]}"#,
        )
        .unwrap();
        let entry = &log.doordash[0];
        assert_eq!(entry.restaurant.as_deref(), Some("Faneuil Hall"));
        assert_eq!(entry.delivery_address.as_deref(), Some("Harvard University"));
        assert!(entry.distance.is_none());
        assert!(!entry.is_empty());
        assert!(DeliveryEntry::default().is_empty());
    }

    #[test]
    fn test_flight_coordinates() {
        let log: TripLog = serde_json::from_str(
            r#"{"flights": [{"airport_a": "JFK", "airport_b": "LHR",
                "from": {"lat": 40.64, "lng": -73.78}, "to": {"lat": 51.47, "lon": -0.45}}]}"#,
        )
        .unwrap();
        let flight = &log.flights[0];
        assert_eq!(flight.to.unwrap().lng, -0.45);
        assert_eq!(flight.airport_a.as_deref(), Some("JFK"));
    }
}
