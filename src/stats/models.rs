use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::{PerSide, Side};

use super::badges::Badge;

/// Consecutive match wins by one side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub side: Option<Side>,
    pub count: u32,
}

impl Streak {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(side: Side, count: u32) -> Self {
        Self {
            side: Some(side),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentResult {
    pub winner: Option<Side>,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayRecord {
    pub weekday: Weekday,
    pub wins: PerSide<u32>,
    pub total: u32,
}

/// Head-to-head numbers derived from the whole match history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RivalrySummary {
    pub wins: PerSide<u32>,
    pub total_matches: u32,
    pub leader: Option<Side>,
    pub lead_margin: u32,
    pub current_streak: Streak,
    pub longest_streak: Streak,
    pub last5: Vec<RecentResult>,
    pub average_points: PerSide<f64>,
    pub win_rate: PerSide<f64>,
    pub trend: PerSide<Trend>,
    pub weekdays: Vec<WeekdayRecord>,
    pub badges: PerSide<Vec<Badge>>,
}

/// One point of the rating chart. The baseline point has no `played_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EloPoint {
    pub played_at: Option<DateTime<Utc>>,
    pub elo: PerSide<i32>,
    pub match_index: usize,
}
