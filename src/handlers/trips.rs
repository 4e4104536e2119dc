use axum::Json;

use crate::{
    models::{calculations::CalculatedEmissions, trips::TripLog},
    services::trip_aggregator::aggregate_trips,
};

/// Handler for POST /api/trips/calculate
/// Scores raw trip entries into categorized emissions
pub async fn post_calculate_trips(Json(log): Json<TripLog>) -> Json<CalculatedEmissions> {
    let result = aggregate_trips(&log);

    tracing::info!(
        "Scored trip log: {} categories, {:.2} kg CO2",
        result.categories.len(),
        result.total_emissions
    );

    Json(result)
}
