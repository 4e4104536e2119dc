use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};

use crate::{
    models::{
        emissions::{CalculateEmissionsResponse, ImpactMetrics},
        error::ErrorResponse,
        usage::UsageSubmission,
    },
    services::{
        emission_factors::{emission_factor_table, EmissionFactor},
        emissions_calculator::calculate_emissions,
    },
};

/// Handler for GET /api/emission-factors
pub async fn get_emission_factors() -> Json<Vec<EmissionFactor>> {
    Json(emission_factor_table())
}

/// Handler for POST /api/emissions/calculate
/// Validates a usage submission and returns the breakdown plus impact metrics
pub async fn post_calculate_emissions(
    payload: Result<Json<UsageSubmission>, JsonRejection>,
) -> Result<Json<CalculateEmissionsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(submission) = payload.map_err(|rejection| {
        tracing::info!("Rejected usage body: {}", rejection.body_text());
        (
            rejection.status(),
            Json(ErrorResponse::new(format!(
                "Invalid usage body: {}",
                rejection.body_text()
            ))),
        )
    })?;

    let usage = submission.validate().map_err(|errors| {
        tracing::info!("Rejected usage submission with {} field errors", errors.len());
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: "Invalid usage values".to_string(),
                details: Some(errors),
            }),
        )
    })?;

    let emissions = calculate_emissions(&usage);
    let impact = ImpactMetrics::from_total(emissions.total);

    tracing::info!(
        "Calculated {:.2} kg CO2 ({} trees to offset)",
        emissions.total,
        impact.trees_needed
    );

    Ok(Json(CalculateEmissionsResponse {
        usage,
        emissions,
        impact,
    }))
}
