use axum::{http::StatusCode, Json};

use crate::models::{
    emissions::{ImpactMetrics, ImpactRequest},
    error::ErrorResponse,
};

/// Handler for POST /api/impact
pub async fn post_impact_metrics(
    Json(request): Json<ImpactRequest>,
) -> Result<Json<ImpactMetrics>, (StatusCode, Json<ErrorResponse>)> {
    if !request.total.is_finite() || request.total < 0.0 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("total must be a non-negative number")),
        ));
    }

    Ok(Json(ImpactMetrics::from_total(request.total)))
}
