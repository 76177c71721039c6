use chrono::{Datelike, Weekday};

use crate::domain::{MatchRecord, PerSide, RivalrySides};

use super::models::{Trend, WeekdayRecord};
use super::LAST_RESULTS;

/// Difference in win rate needed before form counts as up or down
pub const TREND_THRESHOLD: f64 = 0.1;

const WEEK_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

pub fn calculate_trend(
    recent_wins: u32,
    recent_total: u32,
    overall_wins: u32,
    overall_total: u32,
) -> Trend {
    if recent_total == 0 || overall_total == 0 {
        return Trend::Neutral;
    }

    let recent_rate = f64::from(recent_wins) / f64::from(recent_total);
    let overall_rate = f64::from(overall_wins) / f64::from(overall_total);

    if recent_rate > overall_rate + TREND_THRESHOLD {
        Trend::Up
    } else if recent_rate < overall_rate - TREND_THRESHOLD {
        Trend::Down
    } else {
        Trend::Neutral
    }
}

/// Recent form of each side: the last five matches against the whole history
pub fn form_trends(sides: &RivalrySides, matches: &[MatchRecord]) -> PerSide<Trend> {
    let recent = &matches[..matches.len().min(LAST_RESULTS)];
    let recent_wins = super::win_counts(sides, recent);
    let overall_wins = super::win_counts(sides, matches);

    recent_wins.map(|side, wins| {
        calculate_trend(
            wins,
            recent.len() as u32,
            overall_wins[side],
            matches.len() as u32,
        )
    })
}

/// Matches and wins per weekday (UTC), Sunday first
pub fn weekday_breakdown(sides: &RivalrySides, matches: &[MatchRecord]) -> Vec<WeekdayRecord> {
    let mut days: Vec<WeekdayRecord> = WEEK_FROM_SUNDAY
        .iter()
        .map(|&weekday| WeekdayRecord {
            weekday,
            wins: PerSide::default(),
            total: 0,
        })
        .collect();

    for record in matches {
        let day = &mut days[record.played_at.weekday().num_days_from_sunday() as usize];
        day.total += 1;
        if let Some(side) = sides.side_of(&record.winner_id) {
            day.wins[side] += 1;
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Side;
    use crate::shared::test_utils::{history, match_record, rivalry_sides};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    #[rstest]
    #[case(4, 5, 5, 10, Trend::Up)]
    #[case(1, 5, 5, 10, Trend::Down)]
    #[case(3, 5, 5, 10, Trend::Neutral)]
    #[case(0, 0, 5, 10, Trend::Neutral)]
    #[case(0, 5, 0, 0, Trend::Neutral)]
    fn trend_thresholds(
        #[case] recent_wins: u32,
        #[case] recent_total: u32,
        #[case] overall_wins: u32,
        #[case] overall_total: u32,
        #[case] expected: Trend,
    ) {
        assert_eq!(
            calculate_trend(recent_wins, recent_total, overall_wins, overall_total),
            expected
        );
    }

    #[test]
    fn hot_recent_form_trends_up() {
        let sides = rivalry_sides();
        // B dominated early, A took the last five
        let mut sequence = vec![Side::B; 5];
        sequence.extend([Side::A; 5]);
        let matches = history(&sides, &sequence);

        let trends = form_trends(&sides, &matches);
        assert_eq!(trends.a, Trend::Up);
        assert_eq!(trends.b, Trend::Down);
    }

    #[test]
    fn short_history_is_neutral() {
        let sides = rivalry_sides();
        let matches = history(&sides, &[Side::A, Side::B]);
        let trends = form_trends(&sides, &matches);
        assert_eq!(trends, PerSide::new(Trend::Neutral, Trend::Neutral));
    }

    #[test]
    fn groups_matches_by_weekday() {
        let sides = rivalry_sides();
        let mut monday = match_record(&sides, Side::A, (3, 0), (33, 10), 0);
        monday.played_at = Utc.with_ymd_and_hms(2024, 6, 3, 18, 0, 0).unwrap();
        let mut sunday = match_record(&sides, Side::B, (1, 3), (30, 40), 0);
        sunday.played_at = Utc.with_ymd_and_hms(2024, 6, 2, 18, 0, 0).unwrap();
        let mut other_monday = match_record(&sides, Side::B, (2, 3), (45, 50), 0);
        other_monday.played_at = Utc.with_ymd_and_hms(2024, 6, 10, 18, 0, 0).unwrap();

        let days = weekday_breakdown(&sides, &[other_monday, monday, sunday]);

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].weekday, Weekday::Sun);
        assert_eq!(days[0].total, 1);
        assert_eq!(days[0].wins, PerSide::new(0, 1));
        assert_eq!(days[1].weekday, Weekday::Mon);
        assert_eq!(days[1].total, 2);
        assert_eq!(days[1].wins, PerSide::new(1, 1));
        assert!(days[2..].iter().all(|day| day.total == 0));
    }
}
