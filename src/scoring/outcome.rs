use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{NewMatch, PerSide, RivalrySides, SetScore, Side};

use super::rules::match_winner;

/// The result of a finished match, before it is handed to persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub sets: Vec<SetScore>,
    pub winner: Side,
    pub sets_won: PerSide<u8>,
    pub points_total: PerSide<u32>,
}

impl MatchOutcome {
    /// Builds an outcome from decided sets. Returns `None` unless one side
    /// has reached the sets-to-win threshold.
    pub(crate) fn from_sets(sets: Vec<SetScore>) -> Option<Self> {
        let mut sets_won = PerSide::<u8>::default();
        let mut points_total = PerSide::<u32>::default();

        for set in &sets {
            points_total.a = points_total.a.saturating_add(set.points.a);
            points_total.b = points_total.b.saturating_add(set.points.b);
            if let Some(winner) = set.winner {
                sets_won[winner] += 1;
            }
        }

        let winner = match_winner(&sets_won)?;
        Some(Self {
            sets,
            winner,
            sets_won,
            points_total,
        })
    }

    /// Maps the outcome onto stored competitor ids. Side A always lands in
    /// the `side_a_*` columns.
    pub fn to_new_match(
        &self,
        sides: &RivalrySides,
        table_id: &str,
        played_at: DateTime<Utc>,
    ) -> NewMatch {
        NewMatch {
            table_id: table_id.to_string(),
            side_a_id: sides.id(Side::A).to_string(),
            side_b_id: sides.id(Side::B).to_string(),
            winner_id: sides.id(self.winner).to_string(),
            sets_a_won: self.sets_won.a,
            sets_b_won: self.sets_won.b,
            points_a_total: self.points_total.a,
            points_b_total: self.points_total.b,
            played_at,
        }
    }
}
