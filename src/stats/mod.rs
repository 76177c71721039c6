pub mod badges;
pub mod elo;
pub mod models;
pub mod summary;
pub mod trend;

pub use badges::{badges_for, Badge};
pub use elo::{elo_series, expected_score, update_ratings};
pub use models::*;
pub use summary::{
    average_points, current_streak, last5, last_n, lead_margin, leader, longest_streak,
    summarize, win_counts, win_rate,
};
pub use trend::{calculate_trend, form_trends, weekday_breakdown};

/// Number of matches shown as recent results and used for form trends
pub const LAST_RESULTS: usize = 5;
