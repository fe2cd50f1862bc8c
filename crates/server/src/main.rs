use std::sync::Arc;

use server::config;
use server::routes;

use axum::{routing::get, Extension, Router};
use puzzle_trainer::PuzzleStore;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();

    let store = Arc::new(PuzzleStore::builtin()?);
    tracing::info!(
        puzzles = store.len(),
        time_limit_secs = config.trainer.time_limit_secs,
        auto_advance = config.trainer.auto_advance,
        "Puzzle store loaded"
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Health
        .route("/health", get(routes::health::health_check))
        // Puzzles
        .route("/api/puzzles", get(routes::puzzles::list_puzzles))
        .route("/api/puzzles/{index}", get(routes::puzzles::get_puzzle))
        // Trainer session
        .route("/ws/trainer", get(routes::trainer_ws::ws_handler))
        // Shared state
        .layer(Extension(store))
        .layer(Extension(config.clone()))
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
