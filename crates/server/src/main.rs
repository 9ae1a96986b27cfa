use std::sync::Arc;

use anyhow::Context;
use cinepaw_metadata::aggregate::ResultAggregator;
use cinepaw_metadata::omdb::OmdbClient;
use cinepaw_metadata::{AggregatorConfig, FailurePolicy, OmdbConfig, PlotLength};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // OMDb key: CINEPAW_OMDB_API_KEY, falling back to the conventional OMDB_API_KEY
    let api_key = std::env::var("CINEPAW_OMDB_API_KEY")
        .or_else(|_| std::env::var("OMDB_API_KEY"))
        .unwrap_or_default();

    let mut omdb_config = OmdbConfig::with_api_key(api_key);
    if let Ok(url) = std::env::var("CINEPAW_OMDB_URL") {
        omdb_config.base_url = url;
    }
    if let Ok(plot) = std::env::var("CINEPAW_PLOT") {
        omdb_config.plot = plot.parse::<PlotLength>().map_err(anyhow::Error::msg)?;
    }

    let failure_policy = match std::env::var("CINEPAW_DETAIL_FAILURES") {
        Ok(v) => v.parse::<FailurePolicy>().map_err(anyhow::Error::msg)?,
        Err(_) => FailurePolicy::default(),
    };

    let client = OmdbClient::new(omdb_config).context("invalid OMDb configuration")?;
    info!(?failure_policy, "OMDb client ready");

    let aggregator = ResultAggregator::new(Arc::new(client), AggregatorConfig { failure_policy });
    let app_state = cinepaw_server::state::AppState::new(aggregator);
    let app = cinepaw_server::routes::build_router(app_state);

    let bind_addr = std::env::var("CINEPAW_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
