// Folds of a match history into head-to-head numbers.
//
// Every function expects `matches` most recent first, the order the repository
// hands them out in. They are total: an empty history yields zero counts, no
// leader and an empty streak.
use crate::domain::{MatchRecord, PerSide, RivalrySides, Side};

use super::badges::badges;
use super::models::{RecentResult, RivalrySummary, Streak};
use super::trend::{form_trends, weekday_breakdown};
use super::LAST_RESULTS;

fn winner_of(sides: &RivalrySides, record: &MatchRecord) -> Option<Side> {
    sides.side_of(&record.winner_id)
}

/// Points a side scored in one match, looked up by competitor id
fn points_of(sides: &RivalrySides, record: &MatchRecord, side: Side) -> u32 {
    let id = sides.id(side);
    if record.side_a_id == id {
        record.points_a_total
    } else if record.side_b_id == id {
        record.points_b_total
    } else {
        0
    }
}

pub fn win_counts(sides: &RivalrySides, matches: &[MatchRecord]) -> PerSide<u32> {
    let mut wins = PerSide::<u32>::default();
    for record in matches {
        if let Some(side) = winner_of(sides, record) {
            wins[side] += 1;
        }
    }
    wins
}

/// The side with strictly more wins, or `None` on a tie
pub fn leader(wins: &PerSide<u32>) -> Option<Side> {
    if wins.a > wins.b {
        Some(Side::A)
    } else if wins.b > wins.a {
        Some(Side::B)
    } else {
        None
    }
}

pub fn lead_margin(wins: &PerSide<u32>) -> u32 {
    wins.a.abs_diff(wins.b)
}

/// Streak running into the most recent match
pub fn current_streak(sides: &RivalrySides, matches: &[MatchRecord]) -> Streak {
    let Some(first) = matches.first() else {
        return Streak::none();
    };
    let Some(side) = winner_of(sides, first) else {
        return Streak::none();
    };

    let count = matches
        .iter()
        .take_while(|record| winner_of(sides, record) == Some(side))
        .count();

    Streak::new(side, count as u32)
}

/// Longest streak ever, scanning oldest to newest. On ties the earlier
/// streak is kept.
pub fn longest_streak(sides: &RivalrySides, matches: &[MatchRecord]) -> Streak {
    let mut longest = Streak::none();
    let mut running = Streak::none();

    for record in matches.iter().rev() {
        let winner = winner_of(sides, record);
        if winner.is_some() && winner == running.side {
            running.count += 1;
            continue;
        }

        if running.count > longest.count {
            longest = running;
        }
        running = match winner {
            Some(side) => Streak::new(side, 1),
            None => Streak::none(),
        };
    }

    // the streak still running at the newest match
    if running.count > longest.count {
        longest = running;
    }

    longest
}

pub fn last_n(sides: &RivalrySides, matches: &[MatchRecord], n: usize) -> Vec<RecentResult> {
    matches
        .iter()
        .take(n)
        .map(|record| RecentResult {
            winner: winner_of(sides, record),
            played_at: record.played_at,
        })
        .collect()
}

pub fn last5(sides: &RivalrySides, matches: &[MatchRecord]) -> Vec<RecentResult> {
    last_n(sides, matches, LAST_RESULTS)
}

pub fn average_points(sides: &RivalrySides, matches: &[MatchRecord], side: Side) -> f64 {
    if matches.is_empty() {
        return 0.0;
    }
    let total: u64 = matches
        .iter()
        .map(|record| u64::from(points_of(sides, record, side)))
        .sum();
    total as f64 / matches.len() as f64
}

/// Win percentage of a side, 0 when nothing has been played
pub fn win_rate(sides: &RivalrySides, matches: &[MatchRecord], side: Side) -> f64 {
    if matches.is_empty() {
        return 0.0;
    }
    let wins = win_counts(sides, matches)[side];
    f64::from(wins) / matches.len() as f64 * 100.0
}

/// Full summary, recomputed from scratch on every call
pub fn summarize(sides: &RivalrySides, matches: &[MatchRecord]) -> RivalrySummary {
    let wins = win_counts(sides, matches);
    let total_matches = matches.len() as u32;
    let rate = |wins: u32| {
        if total_matches == 0 {
            0.0
        } else {
            f64::from(wins) / f64::from(total_matches) * 100.0
        }
    };

    let leader = leader(&wins);
    let current_streak = current_streak(sides, matches);
    let win_rate = wins.map(|_, count| rate(count));

    RivalrySummary {
        wins,
        total_matches,
        leader,
        lead_margin: lead_margin(&wins),
        current_streak,
        longest_streak: longest_streak(sides, matches),
        last5: last5(sides, matches),
        average_points: PerSide::new(
            average_points(sides, matches, Side::A),
            average_points(sides, matches, Side::B),
        ),
        win_rate,
        trend: form_trends(sides, matches),
        weekdays: weekday_breakdown(sides, matches),
        badges: badges(&current_streak, leader, total_matches, win_rate),
    }
}
