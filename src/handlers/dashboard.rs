use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;

use crate::{
    handlers::proxy::unauthorized,
    models::{
        emissions::{DashboardResponse, ImpactMetrics},
        error::ErrorResponse,
        usage::{usage_bounds, UsageRecord},
    },
    services::{
        emissions_calculator::calculate_emissions, usage_defaults::usage_defaults_from_value,
    },
    AppState,
};

/// Handler for GET /api/dashboard
/// Fetches the user's aggregated history, reshapes it into form defaults and
/// computes the initial breakdown. Upstream failures degrade to zero defaults.
pub async fn get_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardResponse>, (StatusCode, Json<ErrorResponse>)> {
    let session = state.sessions.resolve(&headers).await.ok_or_else(unauthorized)?;

    let (defaults, remote_error) = match state.aggregation.fetch(&session).await {
        Ok(payload) => (usage_defaults_from_value(&payload), None),
        Err(e) => {
            tracing::warn!("Dashboard falling back to zero defaults: {}", e);
            (UsageRecord::default(), Some(e.to_string()))
        }
    };

    let emissions = calculate_emissions(&defaults);
    let impact = ImpactMetrics::from_total(emissions.total);

    Ok(Json(DashboardResponse {
        defaults,
        emissions,
        impact,
        bounds: usage_bounds(),
        remote_error,
        generated_at: Utc::now(),
    }))
}
