use std::sync::Arc;

use anyhow::Context;
use mental_agent_backend::{config::ChatConfig, routes, state::AppState};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ChatConfig::from_env();
    if config.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set, replies will use the canned fallback");
    }
    let bind_addr = config.bind_addr.clone();
    tracing::info!(model = %config.model, "starting mental agent backend");

    let state = Arc::new(AppState::new(config));
    let cors = CorsLayer::very_permissive();

    let app = routes::create_router().with_state(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on http://{bind_addr}");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
