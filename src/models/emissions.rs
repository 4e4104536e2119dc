use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::usage::{FieldBounds, UsageRecord};

/// One category's contribution in the breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionSource {
    pub name: String,
    pub value: f64, // kg CO2
    pub color: String,
}

/// One point of the trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEmission {
    pub month: String,
    pub value: f64, // kg CO2
}

/// Calculator output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionsResult {
    pub sources: Vec<EmissionSource>,
    pub total: f64,
    pub historical: Vec<MonthlyEmission>,
}

/// Real-world equivalents of a CO2 total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactMetrics {
    pub trees_needed: u64,
    pub water_footprint_liters: u64,
    pub driving_equivalent_miles: u64,
    pub offset_cost_usd: u64,
}

/// Response for POST /api/emissions/calculate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateEmissionsResponse {
    pub usage: UsageRecord,
    pub emissions: EmissionsResult,
    pub impact: ImpactMetrics,
}

/// Request body for POST /api/impact
#[derive(Debug, Clone, Deserialize)]
pub struct ImpactRequest {
    #[serde(alias = "totalEmissions")]
    pub total: f64,
}

/// Response for GET /api/dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub defaults: UsageRecord,
    pub emissions: EmissionsResult,
    pub impact: ImpactMetrics,
    pub bounds: Vec<FieldBounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_error: Option<String>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_request_accepts_camel_case() {
        let req: ImpactRequest = serde_json::from_str(r#"{"totalEmissions": 42.5}"#).unwrap();
        assert_eq!(req.total, 42.5);
    }

    #[test]
    fn test_dashboard_response_omits_missing_remote_error() {
        let response = DashboardResponse {
            defaults: UsageRecord::default(),
            emissions: EmissionsResult {
                sources: vec![],
                total: 0.0,
                historical: vec![],
            },
            impact: ImpactMetrics {
                trees_needed: 0,
                water_footprint_liters: 0,
                driving_equivalent_miles: 0,
                offset_cost_usd: 0,
            },
            bounds: vec![],
            remote_error: None,
            generated_at: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("remote_error"));
        assert!(json.contains("generated_at"));
    }
}
