use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::domain::{PerSide, Side};

use super::models::Streak;

pub const HOT_HAND_STREAK: u32 = 3;
pub const ON_FIRE_STREAK: u32 = 5;
pub const VETERAN_MATCHES: u32 = 20;
pub const PERFECTIONIST_WIN_RATE: f64 = 70.0;
pub const PERFECTIONIST_MIN_MATCHES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Badge {
    /// Three or four wins in a row
    HotHand,
    /// Five or more wins in a row; replaces hot hand
    OnFire,
    /// Ahead in the head-to-head
    Champion,
    Veteran,
    /// At least 70% wins over ten or more matches
    Perfectionist,
}

/// Badges one side has earned, derived from the summary figures
pub fn badges_for(
    side: Side,
    current_streak: &Streak,
    leader: Option<Side>,
    total_matches: u32,
    win_rate: f64,
) -> Vec<Badge> {
    let mut badges = Vec::new();

    let streak = if current_streak.side == Some(side) {
        current_streak.count
    } else {
        0
    };
    if streak >= ON_FIRE_STREAK {
        badges.push(Badge::OnFire);
    } else if streak >= HOT_HAND_STREAK {
        badges.push(Badge::HotHand);
    }

    if leader == Some(side) {
        badges.push(Badge::Champion);
    }
    if total_matches >= VETERAN_MATCHES {
        badges.push(Badge::Veteran);
    }
    if win_rate >= PERFECTIONIST_WIN_RATE && total_matches >= PERFECTIONIST_MIN_MATCHES {
        badges.push(Badge::Perfectionist);
    }

    badges
}

pub fn badges(
    current_streak: &Streak,
    leader: Option<Side>,
    total_matches: u32,
    win_rate: PerSide<f64>,
) -> PerSide<Vec<Badge>> {
    win_rate.map(|side, rate| badges_for(side, current_streak, leader, total_matches, rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2, vec![])]
    #[case(3, vec![Badge::HotHand])]
    #[case(4, vec![Badge::HotHand])]
    #[case(5, vec![Badge::OnFire])]
    #[case(9, vec![Badge::OnFire])]
    fn streak_badges(#[case] count: u32, #[case] expected: Vec<Badge>) {
        let streak = Streak::new(Side::B, count);
        assert_eq!(badges_for(Side::B, &streak, None, count, 50.0), expected);
        assert!(badges_for(Side::A, &streak, None, count, 50.0).is_empty());
    }

    #[test]
    fn champion_follows_the_leader() {
        let earned = badges(&Streak::none(), Some(Side::A), 2, PerSide::new(50.0, 50.0));
        assert_eq!(earned.a, vec![Badge::Champion]);
        assert!(earned.b.is_empty());
    }

    #[rstest]
    #[case(9, 90.0, vec![])]
    #[case(10, 70.0, vec![Badge::Perfectionist])]
    #[case(10, 69.9, vec![])]
    #[case(20, 75.0, vec![Badge::Veteran, Badge::Perfectionist])]
    fn volume_badges(#[case] total: u32, #[case] rate: f64, #[case] expected: Vec<Badge>) {
        assert_eq!(badges_for(Side::A, &Streak::none(), None, total, rate), expected);
    }

    #[test]
    fn badges_serialize_kebab_case() {
        assert_eq!(serde_json::to_string(&Badge::HotHand).unwrap(), "\"hot-hand\"");
        assert_eq!(Badge::OnFire.to_string(), "on-fire");
    }
}
