mod routes;
mod storage;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use chronos_extract::ChapterSet;

use crate::storage::MemStorage;

pub struct AppState {
    pub chapters: ChapterSet,
    pub storage: MemStorage,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let data_path = std::env::var("CHRONOS_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/chapters.json"));
    // An absent corpus is served as empty, not a startup failure.
    let chapters = ChapterSet::load(&data_path);
    if chapters.is_empty() {
        tracing::warn!(path = %data_path.display(), "chapter corpus empty or unreadable");
    } else {
        tracing::info!(path = %data_path.display(), "chapter corpus loaded");
    }

    let state = Arc::new(AppState {
        chapters,
        storage: MemStorage::new(),
    });

    let app = Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/historical-data", get(routes::historical_data))
        .route("/api/search", post(routes::search))
        .route("/api/waitlist", post(routes::waitlist))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = std::env::var("CHRONOS_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
