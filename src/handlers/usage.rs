use axum::Json;
use serde_json::Value;

use crate::{
    models::usage::{usage_bounds, FieldBounds, UsageRecord},
    services::usage_defaults::usage_defaults_from_value,
};

/// Handler for GET /api/usage/bounds
pub async fn get_usage_bounds() -> Json<Vec<FieldBounds>> {
    Json(usage_bounds())
}

/// Handler for POST /api/usage/from-remote
/// Reshapes an aggregation payload (bare or enveloped) into form defaults
pub async fn post_usage_from_remote(Json(payload): Json<Value>) -> Json<UsageRecord> {
    let defaults = usage_defaults_from_value(&payload);
    tracing::debug!("Remote payload reshaped into defaults: {:?}", defaults);
    Json(defaults)
}
