use serde::{Deserialize, Serialize};

use crate::domain::{MatchRecord, PerSide, RivalrySides, Side};
use crate::scoring::{EnteredSet, ScoreBoard};

/// Request payload for recording a match from final set scores
#[derive(Debug, Deserialize)]
pub struct QuickEntryRequest {
    pub sets: Vec<EnteredSet>,
}

/// Request payload for scoring one point
#[derive(Debug, Deserialize)]
pub struct PointRequest {
    pub side: Side,
}

/// Scorer view returned by every scorer endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ScorerResponse {
    pub table_id: String,
    pub names: PerSide<String>,
    pub board: ScoreBoard,
    /// Present only on the point that decided the match
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recorded: Option<MatchRecord>,
}

impl ScorerResponse {
    pub fn new(
        table_id: &str,
        sides: &RivalrySides,
        board: ScoreBoard,
        recorded: Option<MatchRecord>,
    ) -> Self {
        Self {
            table_id: table_id.to_string(),
            names: PerSide::new(
                sides.competitor(Side::A).display_name.clone(),
                sides.competitor(Side::B).display_name.clone(),
            ),
            board,
            recorded,
        }
    }
}
