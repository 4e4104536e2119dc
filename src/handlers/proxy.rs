use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::{
    models::{calculations::ProxyResponse, error::ErrorResponse},
    AppState,
};

pub fn unauthorized() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new("Unauthorized")))
}

/// Handler for POST /api/calculate-emissions
/// Injects the session's access token and client credentials, forwards to
/// the aggregation service and relays its JSON
pub async fn post_calculate_emissions_proxy(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProxyResponse>, (StatusCode, Json<ErrorResponse>)> {
    let session = state.sessions.resolve(&headers).await.ok_or_else(|| {
        tracing::info!("Rejected unauthenticated aggregation request");
        unauthorized()
    })?;

    match state.aggregation.fetch(&session).await {
        Ok(data) => {
            tracing::info!("Relaying aggregation data for user {:?}", session.user_id);
            Ok(Json(ProxyResponse {
                message: "Data received".to_string(),
                data,
            }))
        }
        Err(e) => {
            tracing::error!("Failed to calculate emissions: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new(format!("Failed to calculate emissions: {}", e))),
            ))
        }
    }
}

/// Fallback for non-POST methods on the proxy route
pub async fn method_not_allowed() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
}
