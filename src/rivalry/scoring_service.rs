use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::service::RivalryService;
use crate::{
    domain::{MatchRecord, RivalryError, Side},
    scoring::{MatchScorer, PointOutcome, ScoreBoard, ScorerState},
};

/// Tables that may hold a scorer at the same time
pub const DEFAULT_MAX_TABLES: usize = 64;

/// Result of scoring a point; `recorded` is set once the match is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreUpdate {
    pub board: ScoreBoard,
    pub recorded: Option<MatchRecord>,
}

/// A table's scorer and, once stored, the record of its finished match
struct TableMatch {
    scorer: MatchScorer,
    recorded: Option<MatchRecord>,
}

impl TableMatch {
    fn started() -> Self {
        let mut scorer = MatchScorer::new();
        scorer.start();
        Self {
            scorer,
            recorded: None,
        }
    }

    /// Finished but not yet stored
    fn is_pending(&self) -> bool {
        self.scorer.outcome().is_some() && self.recorded.is_none()
    }

    fn is_stored(&self) -> bool {
        self.recorded.is_some()
    }
}

/// Live point-by-point scoring, one scorer per table.
///
/// A finished match stays pending until the repository accepts it. Pending
/// matches are retried by `record_pending` and by `start_match`, and are never
/// replaced by a new scorer.
pub struct ScoringService {
    rivalry_service: Arc<RivalryService>,
    tables: RwLock<HashMap<String, TableMatch>>,
    max_tables: usize,
}

impl ScoringService {
    pub fn new(rivalry_service: Arc<RivalryService>) -> Self {
        Self::with_max_tables(rivalry_service, DEFAULT_MAX_TABLES)
    }

    pub fn with_max_tables(rivalry_service: Arc<RivalryService>, max_tables: usize) -> Self {
        Self {
            rivalry_service,
            tables: RwLock::new(HashMap::new()),
            max_tables: max_tables.max(1),
        }
    }

    /// Starts a match on the table. A match already in progress is kept; a
    /// finished one is stored first if it was not yet.
    #[instrument(skip(self))]
    pub async fn start_match(&self, table_id: &str) -> Result<ScoreBoard, RivalryError> {
        if table_id.trim().is_empty() {
            return Err(RivalryError::Validation(
                "Table ID cannot be empty".to_string(),
            ));
        }

        let mut tables = self.tables.write().await;

        if let Some(table) = tables.get_mut(table_id) {
            if table.scorer.state() == ScorerState::SetInProgress {
                return Ok(table.scorer.board());
            }
            self.store_outcome(table_id, table).await?;
            *table = TableMatch::started();
            info!(table_id = %table_id, "Match started");
            return Ok(table.scorer.board());
        }

        if tables.len() >= self.max_tables {
            // Finished and stored matches are only kept for viewing
            tables.retain(|_, table| !table.is_stored());
            if tables.len() >= self.max_tables {
                warn!(max_tables = self.max_tables, "No free table for a new match");
                return Err(RivalryError::Validation(format!(
                    "At most {} tables can score at once",
                    self.max_tables
                )));
            }
        }

        let table = tables
            .entry(table_id.to_string())
            .or_insert_with(TableMatch::started);
        info!(table_id = %table_id, "Match started");
        Ok(table.scorer.board())
    }

    /// Adds a point and stores the match when it decides the winner.
    ///
    /// If storing fails the error is returned and the match stays pending.
    #[instrument(skip(self))]
    pub async fn score_point(
        &self,
        table_id: &str,
        side: Side,
    ) -> Result<ScoreUpdate, RivalryError> {
        // Held across the insert so a pending match is stored at most once
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_id)
            .ok_or_else(|| no_match(table_id))?;

        let recorded = match table.scorer.score_point(side) {
            PointOutcome::Ignored => {
                debug!(table_id = %table_id, state = ?table.scorer.state(), "Point ignored");
                None
            }
            PointOutcome::Scored { .. } => None,
            PointOutcome::SetWon { set_number, .. } => {
                info!(table_id = %table_id, set_number, "Set won");
                None
            }
            PointOutcome::MatchWon(_) => self.store_outcome(table_id, table).await?,
        };

        Ok(ScoreUpdate {
            board: table.scorer.board(),
            recorded,
        })
    }

    /// Retries storing a finished match whose earlier insert failed.
    /// `recorded` is `None` when nothing was pending.
    #[instrument(skip(self))]
    pub async fn record_pending(&self, table_id: &str) -> Result<ScoreUpdate, RivalryError> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_id)
            .ok_or_else(|| no_match(table_id))?;

        let recorded = self.store_outcome(table_id, table).await?;
        Ok(ScoreUpdate {
            board: table.scorer.board(),
            recorded,
        })
    }

    #[instrument(skip(self))]
    pub async fn undo_last_point(&self, table_id: &str) -> Result<ScoreBoard, RivalryError> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_id)
            .ok_or_else(|| no_match(table_id))?;

        if !table.scorer.undo_last_point() {
            debug!(table_id = %table_id, "Nothing to undo in the current set");
        }
        Ok(table.scorer.board())
    }

    pub async fn board(&self, table_id: &str) -> Result<ScoreBoard, RivalryError> {
        let tables = self.tables.read().await;
        tables
            .get(table_id)
            .map(|table| table.scorer.board())
            .ok_or_else(|| no_match(table_id))
    }

    /// Whether the table holds a finished match that is not stored yet
    pub async fn has_pending(&self, table_id: &str) -> bool {
        let tables = self.tables.read().await;
        tables.get(table_id).is_some_and(TableMatch::is_pending)
    }

    /// Drops the table's scorer without recording anything
    pub async fn discard(&self, table_id: &str) -> bool {
        match self.tables.write().await.remove(table_id) {
            Some(table) => {
                if table.is_pending() {
                    warn!(table_id = %table_id, "Discarded a finished match that was never stored");
                } else {
                    info!(table_id = %table_id, "Match discarded");
                }
                true
            }
            None => false,
        }
    }

    pub async fn table_count(&self) -> usize {
        self.tables.read().await.len()
    }

    /// Stores the table's outcome if it has one that is not stored yet
    async fn store_outcome(
        &self,
        table_id: &str,
        table: &mut TableMatch,
    ) -> Result<Option<MatchRecord>, RivalryError> {
        if !table.is_pending() {
            return Ok(None);
        }
        let Some(outcome) = table.scorer.outcome().cloned() else {
            return Ok(None);
        };

        let record = self
            .rivalry_service
            .record_outcome(table_id, &outcome)
            .await?;
        table.recorded = Some(record.clone());
        Ok(Some(record))
    }
}

fn no_match(table_id: &str) -> RivalryError {
    RivalryError::NotFound(format!("No match started on table: {}", table_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewMatch, PerSide};
    use crate::shared::test_utils::rivalry_sides;
    use crate::storage::{InMemoryMatchRepository, MatchRepository};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scoring_service() -> (Arc<RivalryService>, ScoringService) {
        scoring_service_with(Arc::new(InMemoryMatchRepository::new()))
    }

    fn scoring_service_with(
        repository: Arc<dyn MatchRepository>,
    ) -> (Arc<RivalryService>, ScoringService) {
        let rivalry_service = Arc::new(
            RivalryService::builder(repository)
                .with_sides(rivalry_sides())
                .build(),
        );
        let scoring = ScoringService::new(Arc::clone(&rivalry_service));
        (rivalry_service, scoring)
    }

    /// Fails the first `failures` inserts, then stores normally
    struct FlakyRepository {
        failures: AtomicUsize,
        inner: InMemoryMatchRepository,
    }

    impl FlakyRepository {
        fn failing(failures: usize) -> Self {
            Self {
                failures: AtomicUsize::new(failures),
                inner: InMemoryMatchRepository::new(),
            }
        }
    }

    #[async_trait]
    impl MatchRepository for FlakyRepository {
        async fn insert(&self, new_match: NewMatch) -> Result<MatchRecord, RivalryError> {
            let remaining = self.failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return Err(RivalryError::Repository("connection reset".to_string()));
            }
            self.inner.insert(new_match).await
        }

        async fn list_matches(
            &self,
            table_id: &str,
            limit: usize,
        ) -> Result<Vec<MatchRecord>, RivalryError> {
            self.inner.list_matches(table_id, limit).await
        }
    }

    async fn win_set(scoring: &ScoringService, table_id: &str, side: Side) -> ScoreUpdate {
        let mut last = None;
        for _ in 0..11 {
            last = Some(scoring.score_point(table_id, side).await.unwrap());
        }
        last.unwrap()
    }

    /// Plays two sets and all but the deciding point of the third
    async fn play_to_match_point(scoring: &ScoringService, table_id: &str, side: Side) {
        win_set(scoring, table_id, side).await;
        win_set(scoring, table_id, side).await;
        for _ in 0..10 {
            scoring.score_point(table_id, side).await.unwrap();
        }
    }

    #[tokio::test]
    async fn scoring_requires_started_match() {
        let (_, scoring) = scoring_service();
        let result = scoring.score_point("pink-room-main", Side::A).await;
        assert!(matches!(result, Err(RivalryError::NotFound(_))));
        assert!(matches!(
            scoring.board("pink-room-main").await,
            Err(RivalryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn start_keeps_match_in_progress() {
        let (_, scoring) = scoring_service();
        scoring.start_match("pink-room-main").await.unwrap();
        scoring.score_point("pink-room-main", Side::B).await.unwrap();

        let board = scoring.start_match("pink-room-main").await.unwrap();
        assert_eq!(board.current, PerSide::new(0, 1));
        assert_eq!(board.state, ScorerState::SetInProgress);
    }

    #[tokio::test]
    async fn completed_match_is_recorded_once() {
        let (rivalry, scoring) = scoring_service();
        scoring.start_match("pink-room-main").await.unwrap();

        win_set(&scoring, "pink-room-main", Side::B).await;
        win_set(&scoring, "pink-room-main", Side::B).await;
        let update = win_set(&scoring, "pink-room-main", Side::B).await;

        let record = update.recorded.unwrap();
        assert_eq!(record.winner_id, "crimebaker");
        assert_eq!(record.sets_b_won, 3);
        assert_eq!(record.points_b_total, 33);
        assert_eq!(update.board.state, ScorerState::MatchComplete);

        // Further taps are ignored and nothing else is stored
        let ignored = scoring.score_point("pink-room-main", Side::A).await.unwrap();
        assert!(ignored.recorded.is_none());
        let retried = scoring.record_pending("pink-room-main").await.unwrap();
        assert!(retried.recorded.is_none());
        assert_eq!(rivalry.recent_matches("pink-room-main").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_insert_keeps_match_pending_until_retried() {
        let (rivalry, scoring) = scoring_service_with(Arc::new(FlakyRepository::failing(1)));
        scoring.start_match("t").await.unwrap();
        play_to_match_point(&scoring, "t", Side::A).await;

        let result = scoring.score_point("t", Side::A).await;
        assert!(matches!(result, Err(RivalryError::Repository(_))));
        assert!(scoring.has_pending("t").await);
        assert_eq!(
            scoring.board("t").await.unwrap().state,
            ScorerState::MatchComplete
        );

        let retried = scoring.record_pending("t").await.unwrap();
        let record = retried.recorded.unwrap();
        assert_eq!(record.winner_id, "bachi");
        assert_eq!((record.sets_a_won, record.sets_b_won), (3, 0));
        assert!(!scoring.has_pending("t").await);
        assert_eq!(rivalry.recent_matches("t").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn start_stores_pending_match_before_replacing_it() {
        let (rivalry, scoring) = scoring_service_with(Arc::new(FlakyRepository::failing(2)));
        scoring.start_match("t").await.unwrap();
        play_to_match_point(&scoring, "t", Side::B).await;
        assert!(scoring.score_point("t", Side::B).await.is_err());

        // Still failing: the finished match must not be thrown away
        assert!(matches!(
            scoring.start_match("t").await,
            Err(RivalryError::Repository(_))
        ));
        assert_eq!(
            scoring.board("t").await.unwrap().state,
            ScorerState::MatchComplete
        );

        let board = scoring.start_match("t").await.unwrap();
        assert_eq!(board.state, ScorerState::SetInProgress);
        let stored = rivalry.recent_matches("t").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].winner_id, "crimebaker");
    }

    #[tokio::test]
    async fn restart_after_completion_begins_fresh() {
        let (_, scoring) = scoring_service();
        scoring.start_match("t").await.unwrap();
        for _ in 0..3 {
            win_set(&scoring, "t", Side::A).await;
        }

        let board = scoring.start_match("t").await.unwrap();
        assert_eq!(board.state, ScorerState::SetInProgress);
        assert_eq!(board.set_number, 1);
        assert_eq!(board.sets_won, PerSide::new(0, 0));
    }

    #[tokio::test]
    async fn undo_and_discard() {
        let (_, scoring) = scoring_service();
        scoring.start_match("t").await.unwrap();
        scoring.score_point("t", Side::A).await.unwrap();
        scoring.score_point("t", Side::A).await.unwrap();

        let board = scoring.undo_last_point("t").await.unwrap();
        assert_eq!(board.current, PerSide::new(1, 0));

        assert!(scoring.discard("t").await);
        assert!(!scoring.discard("t").await);
        assert!(matches!(
            scoring.undo_last_point("t").await,
            Err(RivalryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn tables_score_independently() {
        let (_, scoring) = scoring_service();
        scoring.start_match("left").await.unwrap();
        scoring.start_match("right").await.unwrap();
        scoring.score_point("left", Side::A).await.unwrap();

        assert_eq!(
            scoring.board("right").await.unwrap().current,
            PerSide::new(0, 0)
        );
    }

    #[tokio::test]
    async fn table_limit_evicts_stored_matches_first() {
        let rivalry = Arc::new(
            RivalryService::builder(Arc::new(InMemoryMatchRepository::new()))
                .with_sides(rivalry_sides())
                .build(),
        );
        let scoring = ScoringService::with_max_tables(rivalry, 2);

        scoring.start_match("first").await.unwrap();
        scoring.start_match("second").await.unwrap();
        assert!(matches!(
            scoring.start_match("third").await,
            Err(RivalryError::Validation(_))
        ));

        for _ in 0..3 {
            win_set(&scoring, "first", Side::A).await;
        }
        scoring.start_match("third").await.unwrap();

        assert_eq!(scoring.table_count().await, 2);
        assert!(matches!(
            scoring.board("first").await,
            Err(RivalryError::NotFound(_))
        ));
        assert!(scoring.board("second").await.is_ok());
    }
}
