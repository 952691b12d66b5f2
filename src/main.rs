//! Question Generation Service - Main Entry Point
//!
//! Upload PDFs, get sampled exam-style questions back per document.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qgen::api::{build_router, AppState};
use qgen::generation::InferenceClient;
use qgen::pipeline::PipelineOrchestrator;
use qgen::types::ServiceConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "qgen=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = ServiceConfig::load().context("failed to load configuration")?;

    info!("Starting Question Generation Service v{}", env!("CARGO_PKG_VERSION"));
    info!(
        model = %config.model,
        endpoint = %config.generation_url,
        max_chunk_length = config.max_chunk_length,
        extraction_concurrency = config.extraction_concurrency,
        "Loaded configuration"
    );

    // Initialize components
    let model = InferenceClient::from_config(&config).context("failed to build model client")?;
    let pipeline = PipelineOrchestrator::from_config(&config, Arc::new(model));
    let state = Arc::new(AppState::new(pipeline, config.clone()));

    spawn_session_reaper(Arc::clone(&state), config.session_ttl_minutes);

    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drop sessions idle longer than the TTL.
fn spawn_session_reaper(state: Arc<AppState>, ttl_minutes: i64) {
    let ttl = chrono::Duration::minutes(ttl_minutes);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            let removed = state.sessions.write().await.cleanup_idle_sessions(ttl);
            if removed > 0 {
                info!(removed, "Dropped idle sessions");
            }
        }
    });
}
