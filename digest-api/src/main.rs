//! Daily News Digest API Server
//!
//! HTTP server exposing subscribe/unsubscribe endpoints and running the
//! daily digest pipeline on a background schedule.

mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use digest_news::{ExaClient, Summarizer};
use digest_services::{DigestConfig, DigestPipeline, DigestScheduler, Mailer, SubscriberStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SubscriberStore>,
    pub config: Arc<DigestConfig>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,digest_api=debug")),
        )
        .init();

    info!("Starting Daily News Digest API");

    let config = Arc::new(DigestConfig::from_env()?);
    info!(
        "Configured topics: {:?}, daily send time: {}",
        config.topics,
        config.schedule_time.format("%H:%M")
    );

    info!("Initializing subscriber store at: {}", config.db_path);
    let store = Arc::new(SubscriberStore::new(&config.db_path)?);

    let exa = ExaClient::new(config.exa_api_key.clone());
    let summarizer = Summarizer::default();
    let mailer = Mailer::from_config(&config)?;

    let pipeline = Arc::new(DigestPipeline::new(
        exa,
        summarizer,
        mailer,
        Arc::clone(&store),
        config.topics.clone(),
    ));

    // Start the daily schedule loop in the background
    let scheduler = Arc::new(DigestScheduler::new(pipeline, config.schedule_time));
    let scheduler_handle = tokio::spawn(Arc::clone(&scheduler).run());

    let state = AppState { store, config };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .merge(routes::api_routes())
        .layer(cors)
        .with_state(state);

    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.stop();
    let _ = scheduler_handle.await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
