// Point-by-point scoring of a single best-of-5 match.
//
// Misuse (scoring before start or after the match, undo across a set boundary)
// leaves the scorer untouched instead of failing: a stray tap on the score
// sheet must never corrupt the match.
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{PerSide, SetScore, Side};

use super::outcome::MatchOutcome;
use super::rules::{set_winner, POINTS_TO_WIN_SET, SETS_TO_WIN_MATCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerState {
    NotStarted,
    SetInProgress,
    MatchComplete,
}

/// What a call to `score_point` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointOutcome {
    /// The scorer was not accepting points
    Ignored,
    Scored { score: PerSide<u32> },
    SetWon { set: SetScore, set_number: usize },
    MatchWon(MatchOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PointEntry {
    side: Side,
    set_index: usize,
}

/// Read-only view of the scorer for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub state: ScorerState,
    pub set_number: usize,
    pub current: PerSide<u32>,
    pub sets_won: PerSide<u8>,
    pub completed_sets: Vec<SetScore>,
    pub last_scorer: Option<Side>,
    pub winner: Option<Side>,
    pub deuce: bool,
}

#[derive(Debug, Clone)]
pub struct MatchScorer {
    state: ScorerState,
    current: PerSide<u32>,
    completed_sets: Vec<SetScore>,
    sets_won: PerSide<u8>,
    history: Vec<PointEntry>,
    outcome: Option<MatchOutcome>,
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchScorer {
    pub fn new() -> Self {
        Self {
            state: ScorerState::NotStarted,
            current: PerSide::default(),
            completed_sets: Vec::new(),
            sets_won: PerSide::default(),
            history: Vec::new(),
            outcome: None,
        }
    }

    pub fn start(&mut self) {
        if self.state == ScorerState::NotStarted {
            self.state = ScorerState::SetInProgress;
            debug!("Match scoring started");
        }
    }

    pub fn score_point(&mut self, side: Side) -> PointOutcome {
        if self.state != ScorerState::SetInProgress {
            return PointOutcome::Ignored;
        }

        self.current[side] += 1;
        self.history.push(PointEntry {
            side,
            set_index: self.completed_sets.len(),
        });

        let Some(set_side) = set_winner(&self.current) else {
            return PointOutcome::Scored {
                score: self.current,
            };
        };

        let finished = SetScore {
            points: self.current,
            winner: Some(set_side),
        };
        self.completed_sets.push(finished);
        self.sets_won[set_side] += 1;
        self.current = PerSide::default();

        debug!(
            set_number = self.completed_sets.len(),
            winner = %set_side,
            points_a = finished.points.a,
            points_b = finished.points.b,
            "Set completed"
        );

        if self.sets_won[set_side] < SETS_TO_WIN_MATCH {
            return PointOutcome::SetWon {
                set: finished,
                set_number: self.completed_sets.len(),
            };
        }

        self.state = ScorerState::MatchComplete;
        match MatchOutcome::from_sets(self.completed_sets.clone()) {
            Some(outcome) => {
                debug!(winner = %outcome.winner, "Match completed");
                self.outcome = Some(outcome.clone());
                PointOutcome::MatchWon(outcome)
            }
            // Unreachable: the tally above already reached the threshold
            None => PointOutcome::Ignored,
        }
    }

    /// Takes back the last point if it was scored in the active set.
    /// Returns whether anything changed.
    pub fn undo_last_point(&mut self) -> bool {
        if self.state != ScorerState::SetInProgress {
            return false;
        }

        let Some(last) = self.history.last().copied() else {
            return false;
        };

        if last.set_index != self.completed_sets.len() {
            return false;
        }

        self.history.pop();
        self.current[last.side] = self.current[last.side].saturating_sub(1);
        true
    }

    pub fn state(&self) -> ScorerState {
        self.state
    }

    pub fn current_set(&self) -> PerSide<u32> {
        self.current
    }

    pub fn completed_sets(&self) -> &[SetScore] {
        &self.completed_sets
    }

    pub fn sets_won(&self) -> PerSide<u8> {
        self.sets_won
    }

    /// 1-based number of the set being played (or the last one, once complete)
    pub fn set_number(&self) -> usize {
        match self.state {
            ScorerState::MatchComplete => self.completed_sets.len(),
            _ => self.completed_sets.len() + 1,
        }
    }

    pub fn last_scorer(&self) -> Option<Side> {
        self.history.last().map(|entry| entry.side)
    }

    pub fn winner(&self) -> Option<Side> {
        self.outcome.as_ref().map(|outcome| outcome.winner)
    }

    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    /// Both sides on 10 or more in the active set
    pub fn is_deuce(&self) -> bool {
        self.state == ScorerState::SetInProgress
            && self.current.a >= POINTS_TO_WIN_SET - 1
            && self.current.b >= POINTS_TO_WIN_SET - 1
    }

    pub fn board(&self) -> ScoreBoard {
        ScoreBoard {
            state: self.state,
            set_number: self.set_number(),
            current: self.current,
            sets_won: self.sets_won,
            completed_sets: self.completed_sets.clone(),
            last_scorer: self.last_scorer(),
            winner: self.winner(),
            deuce: self.is_deuce(),
        }
    }
}
