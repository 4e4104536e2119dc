// src/lib.rs

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::services::{
    aggregation_client::{AggregationClient, AggregationError},
    session::{BearerSessionResolver, SessionResolver},
};

#[derive(Clone)]
pub struct AppState {
    pub aggregation: AggregationClient,
    pub sessions: Arc<dyn SessionResolver>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, AggregationError> {
        Self::with_sessions(config, Arc::new(BearerSessionResolver))
    }

    pub fn with_sessions(
        config: &AppConfig,
        sessions: Arc<dyn SessionResolver>,
    ) -> Result<Self, AggregationError> {
        Ok(Self {
            aggregation: AggregationClient::new(config)?,
            sessions,
        })
    }
}

pub mod config;

pub mod services {
    pub mod emission_factors;
    pub mod emissions_calculator;
    pub mod impact_metrics;
    pub mod usage_defaults;
    pub mod aggregation_client;
    pub mod session;
    pub mod trip_utils;
    pub mod trip_aggregator;
}

pub mod models;
pub mod handlers;

async fn hello_footprint() -> &'static str {
    "Hello from Footprint Backend!"
}

/// All API routes, with tracing and CORS layers applied
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello_footprint))
        .route("/api/emission-factors", get(handlers::emissions::get_emission_factors))
        .route("/api/usage/bounds", get(handlers::usage::get_usage_bounds))
        .route("/api/usage/from-remote", post(handlers::usage::post_usage_from_remote))
        .route(
            "/api/emissions/calculate",
            post(handlers::emissions::post_calculate_emissions),
        )
        .route("/api/impact", post(handlers::impact::post_impact_metrics))
        .route("/api/trips/calculate", post(handlers::trips::post_calculate_trips))
        .route(
            "/api/calculate-emissions",
            post(handlers::proxy::post_calculate_emissions_proxy)
                .fallback(handlers::proxy::method_not_allowed),
        )
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
