use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{PerSide, RivalryError, SetScore};

use super::outcome::MatchOutcome;
use super::rules::{match_winner, set_winner, MAX_SETS};

/// Final score of one set as typed into the quick entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnteredSet {
    pub a: u32,
    pub b: u32,
}

impl EnteredSet {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    fn is_blank(&self) -> bool {
        self.a == 0 && self.b == 0
    }
}

/// Validates final set scores and turns them into a match outcome.
///
/// Blank 0-0 rows are unplayed sets and are skipped. Every other row has to be
/// a finished set under the regular set rule, and no set may follow the one
/// that decided the match.
pub fn evaluate_sets(entered: &[EnteredSet]) -> Result<MatchOutcome, RivalryError> {
    let played: Vec<&EnteredSet> = entered.iter().filter(|set| !set.is_blank()).collect();

    if played.len() > MAX_SETS {
        return Err(RivalryError::Validation(format!(
            "A match has at most {} sets, got {}",
            MAX_SETS,
            played.len()
        )));
    }

    let mut sets = Vec::with_capacity(played.len());
    let mut sets_won = PerSide::<u8>::default();
    let mut points_total = PerSide::<u32>::default();

    for (index, entry) in played.iter().enumerate() {
        if match_winner(&sets_won).is_some() {
            return Err(RivalryError::Validation(format!(
                "Set {} was entered after the match was already decided",
                index + 1
            )));
        }

        let points = PerSide::new(entry.a, entry.b);
        let winner = set_winner(&points).ok_or_else(|| {
            RivalryError::Validation(format!(
                "Set {} ({}-{}) is not a finished set",
                index + 1,
                entry.a,
                entry.b
            ))
        })?;

        let (Some(total_a), Some(total_b)) = (
            points_total.a.checked_add(points.a),
            points_total.b.checked_add(points.b),
        ) else {
            return Err(RivalryError::Validation(format!(
                "Set {} ({}-{}) is out of range",
                index + 1,
                entry.a,
                entry.b
            )));
        };
        points_total = PerSide::new(total_a, total_b);

        sets_won[winner] += 1;
        sets.push(SetScore {
            points,
            winner: Some(winner),
        });
    }

    let outcome = MatchOutcome::from_sets(sets).ok_or_else(|| {
        RivalryError::Validation(format!(
            "No side has won the match yet ({}-{} in sets)",
            sets_won.a, sets_won.b
        ))
    })?;

    debug!(
        winner = %outcome.winner,
        sets_a = outcome.sets_won.a,
        sets_b = outcome.sets_won.b,
        "Quick entry accepted"
    );

    Ok(outcome)
}
