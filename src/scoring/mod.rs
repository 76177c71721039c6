// Public API
pub use outcome::MatchOutcome;
pub use quick_entry::{evaluate_sets, EnteredSet};
pub use scorer::{MatchScorer, PointOutcome, ScoreBoard, ScorerState};

pub mod rules;

// Internal modules
mod outcome;
mod quick_entry;
mod scorer;
