use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Categorized response of the emissions-aggregation service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatedEmissions {
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryTotals>,
    #[serde(default)]
    pub context: EmissionsContext,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub total_emissions: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub entry_details: BTreeMap<String, Vec<EntryDetail>>,
}

/// Distance and emissions summed over one source (flights, uber_rides, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub emissions: f64,
    /// Per-flight breakdown, only present on the flights category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<FlightSegment>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightSegment {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub emissions: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airport_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airport_b: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionsContext {
    #[serde(default)]
    pub london_ny_percentage: f64,
    #[serde(default)]
    pub trees_needed: u64,
}

/// Outcome of processing one raw trip entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryDetail {
    pub distance: f64,
    pub emissions: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub direct_distance: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airport_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airport_b: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Envelope relayed by the proxy endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyResponse {
    pub message: String,
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_flights_without_segments() {
        let json = r#"{
            "categories": {
                "flights": {"distance": 1200.0, "emissions": 300.0},
                "lyft": {"distance": 12.3, "emissions": 4.92}
            },
            "context": {"london_ny_percentage": 34.8, "trees_needed": 14},
            "success": true,
            "total_emissions": 304.92
        }"#;

        let parsed: CalculatedEmissions = serde_json::from_str(json).unwrap();
        let flights = parsed.categories.get("flights").unwrap();
        assert_eq!(flights.distance, 1200.0);
        assert!(flights.segments.is_none());
        assert_eq!(parsed.context.trees_needed, 14);
        assert!(parsed.success);
    }

    #[test]
    fn test_deserialize_flights_with_segments() {
        let json = r#"{
            "categories": {
                "flights": {
                    "distance": 500.0,
                    "emissions": 125.0,
                    "segments": [
                        {"distance": 300.0, "emissions": 75.0, "airport_a": "PDX", "airport_b": "SFO"},
                        {"distance": 200.0, "emissions": 50.0}
                    ]
                }
            }
        }"#;

        let parsed: CalculatedEmissions = serde_json::from_str(json).unwrap();
        let segments = parsed.categories["flights"].segments.as_ref().unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].airport_a.as_deref(), Some("PDX"));
        assert!(!parsed.success);
    }

    #[test]
    fn test_entry_detail_skips_empty_fields() {
        let detail = EntryDetail {
            distance: 5.0,
            emissions: 2.0,
            ..Default::default()
        };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(!json.contains("direct_distance"));
        assert!(!json.contains("error"));
        assert!(!json.contains("time_minutes"));
    }
}
