use tracing::warn;

use crate::domain::{MatchRecord, PerSide, RivalrySides, Side};

use super::models::EloPoint;

pub const K_FACTOR: f64 = 32.0;
pub const BASELINE_RATING: i32 = 1000;

/// Probability that a player rated `own` beats one rated `other`
pub fn expected_score(own: i32, other: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf(f64::from(other - own) / 400.0))
}

/// Ratings after one match. Each side is rounded on its own, so the pair can
/// drift from zero-sum by one point.
pub fn update_ratings(ratings: PerSide<i32>, winner: Side) -> PerSide<i32> {
    let expected_a = expected_score(ratings.a, ratings.b);
    let expected = PerSide::new(expected_a, 1.0 - expected_a);

    ratings.map(|side, rating| {
        let actual = if side == winner { 1.0 } else { 0.0 };
        (f64::from(rating) + K_FACTOR * (actual - expected[side])).round() as i32
    })
}

/// Rating history in chronological order, starting from a 1000/1000
/// baseline point. Matches whose winner is not one of the sides are skipped.
pub fn elo_series(sides: &RivalrySides, matches: &[MatchRecord]) -> Vec<EloPoint> {
    if matches.is_empty() {
        return Vec::new();
    }

    let mut ratings = PerSide::new(BASELINE_RATING, BASELINE_RATING);
    let mut series = Vec::with_capacity(matches.len() + 1);
    series.push(EloPoint {
        played_at: None,
        elo: ratings,
        match_index: 0,
    });

    for record in matches.iter().rev() {
        let Some(winner) = sides.side_of(&record.winner_id) else {
            warn!(
                match_id = %record.id,
                winner_id = %record.winner_id,
                "Skipping match with unknown winner in rating series"
            );
            continue;
        };

        ratings = update_ratings(ratings, winner);
        series.push(EloPoint {
            played_at: Some(record.played_at),
            elo: ratings,
            match_index: series.len(),
        });
    }

    series
}
