use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::side::{PerSide, Side};

/// A finished match as stored by the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub table_id: String,
    pub side_a_id: String,
    pub side_b_id: String,
    pub winner_id: String,
    pub sets_a_won: u8,
    pub sets_b_won: u8,
    pub points_a_total: u32,
    pub points_b_total: u32,
    pub played_at: DateTime<Utc>,
}

/// A finished match that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMatch {
    pub table_id: String,
    pub side_a_id: String,
    pub side_b_id: String,
    pub winner_id: String,
    pub sets_a_won: u8,
    pub sets_b_won: u8,
    pub points_a_total: u32,
    pub points_b_total: u32,
    pub played_at: DateTime<Utc>,
}

impl NewMatch {
    pub fn into_record(self, id: String) -> MatchRecord {
        MatchRecord {
            id,
            table_id: self.table_id,
            side_a_id: self.side_a_id,
            side_b_id: self.side_b_id,
            winner_id: self.winner_id,
            sets_a_won: self.sets_a_won,
            sets_b_won: self.sets_b_won,
            points_a_total: self.points_a_total,
            points_b_total: self.points_b_total,
            played_at: self.played_at,
        }
    }
}

/// Points of one set. `winner` stays `None` while the set is being played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub points: PerSide<u32>,
    pub winner: Option<Side>,
}

impl SetScore {
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            points: PerSide::new(a, b),
            winner: None,
        }
    }
}
