use pink_room_rivalry::{stats::Streak, PerSide, RivalrySummary, Side};

// ============================================================================
// Summary Assertions
// ============================================================================

/// Fluent checks against a computed summary
pub struct SummaryAssertion<'a> {
    summary: &'a RivalrySummary,
}

#[allow(dead_code)]
impl<'a> SummaryAssertion<'a> {
    pub fn of(summary: &'a RivalrySummary) -> Self {
        Self { summary }
    }

    pub fn wins(self, a: u32, b: u32) -> Self {
        assert_eq!(self.summary.wins, PerSide::new(a, b), "win counts");
        assert_eq!(
            self.summary.total_matches,
            a + b,
            "total matches should equal the sum of wins"
        );
        self
    }

    pub fn leader(self, leader: Option<Side>, margin: u32) -> Self {
        assert_eq!(self.summary.leader, leader, "leader");
        assert_eq!(self.summary.lead_margin, margin, "lead margin");
        self
    }

    pub fn current_streak(self, side: Side, count: u32) -> Self {
        assert_eq!(self.summary.current_streak, Streak::new(side, count), "current streak");
        self
    }

    pub fn longest_streak(self, side: Side, count: u32) -> Self {
        assert_eq!(self.summary.longest_streak, Streak::new(side, count), "longest streak");
        self
    }

    /// Winners of the most recent matches, newest first
    pub fn last_results(self, winners: &[Side]) -> Self {
        let actual: Vec<Option<Side>> = self.summary.last5.iter().map(|r| r.winner).collect();
        let expected: Vec<Option<Side>> = winners.iter().copied().map(Some).collect();
        assert_eq!(actual, expected, "last results");
        self
    }

    /// Percentages over decided matches add up to 100
    pub fn win_rates_sum_to_hundred(self) -> Self {
        let total = self.summary.win_rate.a + self.summary.win_rate.b;
        assert!((total - 100.0).abs() < 1e-6, "win rates sum to {}", total);
        self
    }
}
