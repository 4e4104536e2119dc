use axum::{http::StatusCode, routing::post, Json, Router};
use footprint_backend::{build_router, config::AppConfig, AppState};
use serde_json::Value;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Stand-in for the aggregation service.
/// Always answers with `status` and `payload`, counting calls.
pub struct StubAggregation {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl StubAggregation {
    pub async fn spawn(status: StatusCode, payload: Value) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let app = Router::new().route(
            "/calculate-emissions",
            post(move |Json(_body): Json<Value>| {
                let counter = counter.clone();
                let payload = payload.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (status, Json(payload))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}/calculate-emissions", addr),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Router wired to the given aggregation URL
pub fn build_test_router(aggregation_url: &str) -> Router {
    let config = AppConfig {
        aggregation_url: aggregation_url.to_string(),
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        request_timeout_secs: 5,
        ..AppConfig::default()
    };

    let state = AppState::new(&config).expect("Failed to build app state");
    build_router(state)
}

/// URL nothing listens on
#[allow(dead_code)]
pub async fn closed_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/calculate-emissions", addr)
}
