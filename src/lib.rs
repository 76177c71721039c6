// Library crate for the Pink Room rivalry server
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod domain;
pub mod event;
pub mod rivalry;
pub mod scoring;
pub mod shared;
pub mod stats;
pub mod storage;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use rivalry::handlers;

// Re-export commonly used types for easier access in tests
pub use config::{AppConfig, ConfigError};
pub use domain::{MatchRecord, PerSide, RivalryError, RivalrySides, Side};
pub use event::{EventBus, RivalryEvent};
pub use rivalry::{LiveRivalry, RivalryService, RivalrySnapshot, ScoringService};
pub use scoring::{EnteredSet, MatchScorer, ScoreBoard, ScorerState};
pub use shared::{AppError, AppState};
pub use stats::{EloPoint, RivalrySummary};
pub use storage::{InMemoryMatchRepository, MatchRepository};

/// HTTP routes for recording matches and reading rivalry statistics
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/tables/:table/matches",
            get(handlers::list_matches).post(handlers::submit_quick_entry),
        )
        .route("/tables/:table/summary", get(handlers::summary))
        .route("/tables/:table/elo", get(handlers::elo))
        .route(
            "/tables/:table/scorer",
            get(handlers::scorer).delete(handlers::discard_match),
        )
        .route("/tables/:table/scorer/start", post(handlers::start_match))
        .route("/tables/:table/scorer/point", post(handlers::score_point))
        .route("/tables/:table/scorer/undo", post(handlers::undo_point))
        .route("/tables/:table/scorer/record", post(handlers::record_pending))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
