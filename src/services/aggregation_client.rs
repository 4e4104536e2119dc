use moka::future::Cache;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::{config::AppConfig, services::session::Session};

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("aggregation service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("aggregation service returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },
    #[error("aggregation service sent an unreadable response: {0}")]
    Decode(reqwest::Error),
}

impl AggregationError {
    fn is_retryable(&self) -> bool {
        match self {
            AggregationError::Transport(_) => true,
            AggregationError::Upstream { status, .. } => status.is_server_error(),
            AggregationError::Client(_) | AggregationError::Decode(_) => false,
        }
    }
}

/// Body sent to the aggregation service
#[derive(Debug, Serialize)]
struct AggregationRequest<'a> {
    access_token: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

/// Client for the backend emissions-aggregation service.
///
/// Responses are cached per access token for a short staleness window.
/// Concurrent misses for the same token are not de-duplicated.
#[derive(Clone)]
pub struct AggregationClient {
    client: Client,
    url: String,
    client_id: String,
    client_secret: String,
    retries: u32,
    cache: Arc<Cache<String, Value>>,
}

impl AggregationClient {
    pub fn new(config: &AppConfig) -> Result<Self, AggregationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(AggregationError::Client)?;

        let cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(Duration::from_secs(config.cache_ttl_secs))
            .build();

        Ok(Self {
            client,
            url: config.aggregation_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            retries: config.retries,
            cache: Arc::new(cache),
        })
    }

    /// Fetch the categorized emissions for a session's user
    pub async fn fetch(&self, session: &Session) -> Result<Value, AggregationError> {
        if let Some(cached) = self.cache.get(&session.access_token).await {
            tracing::debug!("Aggregation cache hit for user {:?}", session.user_id);
            return Ok(cached);
        }

        let mut attempt = 0;
        let data = loop {
            match self.post(session).await {
                Ok(data) => break data,
                Err(e) if e.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Aggregation request failed ({}), retry {}/{}",
                        e,
                        attempt,
                        self.retries
                    );
                }
                Err(e) => return Err(e),
            }
        };

        self.cache
            .insert(session.access_token.clone(), data.clone())
            .await;

        Ok(data)
    }

    async fn post(&self, session: &Session) -> Result<Value, AggregationError> {
        tracing::info!("Requesting emissions aggregation from {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&AggregationRequest {
                access_token: &session.access_token,
                client_id: &self.client_id,
                client_secret: &self.client_secret,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AggregationError::Upstream { status, body });
        }

        response
            .json::<Value>()
            .await
            .map_err(AggregationError::Decode)
    }
}
