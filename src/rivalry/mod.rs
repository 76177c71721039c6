// Services and HTTP surface tying scoring, storage and statistics together.

// Public API - what other modules can use
pub use live::LiveRivalry;
pub use scoring_service::{ScoreUpdate, ScoringService, DEFAULT_MAX_TABLES};
pub use service::{RivalryService, RivalryServiceBuilder, RivalrySnapshot};
pub use types::{PointRequest, QuickEntryRequest, ScorerResponse};

pub mod handlers;

// Internal modules
mod live;
mod scoring_service;
mod service;
mod types;
