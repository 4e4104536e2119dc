use anyhow::Context;
use footprint_backend::{build_router, config::AppConfig, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,footprint_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Loads .env before reading variables
    let config = AppConfig::from_env().context("Invalid configuration")?;

    tracing::info!(
        "Aggregation service: {} (cache {}s, {} retries)",
        config.aggregation_url,
        config.cache_ttl_secs,
        config.retries
    );
    if config.client_id.is_empty() {
        tracing::warn!("AUTH_GOOGLE_ID is not set, aggregation requests will carry no client id");
    }

    let state = AppState::new(&config).context("Failed to build aggregation client")?;
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
