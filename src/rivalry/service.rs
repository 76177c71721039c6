use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{
    config::AppConfig,
    domain::{MatchRecord, RivalryError, RivalrySides},
    event::{EventBus, RivalryEvent},
    scoring::{evaluate_sets, EnteredSet, MatchOutcome},
    stats::{elo_series, summarize, EloPoint, RivalrySummary},
    storage::MatchRepository,
};

/// Everything the statistics screens render for one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RivalrySnapshot {
    pub table_id: String,
    pub summary: RivalrySummary,
    pub elo: Vec<EloPoint>,
}

/// Records finished matches and derives statistics from the stored history
pub struct RivalryService {
    repository: Arc<dyn MatchRepository>,
    event_bus: EventBus,
    sides: RivalrySides,
    match_limit: usize,
}

impl RivalryService {
    pub fn builder(repository: Arc<dyn MatchRepository>) -> RivalryServiceBuilder {
        RivalryServiceBuilder::new(repository)
    }

    pub fn sides(&self) -> &RivalrySides {
        &self.sides
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn match_limit(&self) -> usize {
        self.match_limit
    }

    /// Stores a finished match and announces it on the table's channel
    #[instrument(skip(self, outcome))]
    pub async fn record_outcome(
        &self,
        table_id: &str,
        outcome: &MatchOutcome,
    ) -> Result<MatchRecord, RivalryError> {
        if table_id.trim().is_empty() {
            return Err(RivalryError::Validation(
                "Table ID cannot be empty".to_string(),
            ));
        }

        let new_match = outcome.to_new_match(&self.sides, table_id, Utc::now());
        let record = self.repository.insert(new_match).await?;

        info!(
            match_id = %record.id,
            winner = %self.sides.display_name(Some(outcome.winner)),
            sets_a = record.sets_a_won,
            sets_b = record.sets_b_won,
            "Match recorded"
        );

        self.event_bus
            .emit(RivalryEvent::MatchRecorded {
                record: record.clone(),
            })
            .await;

        Ok(record)
    }

    /// Records a match from final set scores typed in directly
    #[instrument(skip(self, sets))]
    pub async fn submit_quick_entry(
        &self,
        table_id: &str,
        sets: &[EnteredSet],
    ) -> Result<MatchRecord, RivalryError> {
        let outcome = evaluate_sets(sets)?;
        self.record_outcome(table_id, &outcome).await
    }

    pub async fn recent_matches(&self, table_id: &str) -> Result<Vec<MatchRecord>, RivalryError> {
        self.repository
            .list_matches(table_id, self.match_limit)
            .await
    }

    pub async fn summary(&self, table_id: &str) -> Result<RivalrySummary, RivalryError> {
        let matches = self.recent_matches(table_id).await?;
        Ok(summarize(&self.sides, &matches))
    }

    pub async fn elo(&self, table_id: &str) -> Result<Vec<EloPoint>, RivalryError> {
        let matches = self.recent_matches(table_id).await?;
        Ok(elo_series(&self.sides, &matches))
    }

    /// Summary and rating series computed from a single fetch
    #[instrument(skip(self))]
    pub async fn snapshot(&self, table_id: &str) -> Result<RivalrySnapshot, RivalryError> {
        let matches = self.recent_matches(table_id).await?;
        debug!(match_count = matches.len(), "Computing rivalry snapshot");

        Ok(RivalrySnapshot {
            table_id: table_id.to_string(),
            summary: summarize(&self.sides, &matches),
            elo: elo_series(&self.sides, &matches),
        })
    }
}

pub struct RivalryServiceBuilder {
    repository: Arc<dyn MatchRepository>,
    event_bus: EventBus,
    sides: RivalrySides,
    match_limit: usize,
}

impl RivalryServiceBuilder {
    fn new(repository: Arc<dyn MatchRepository>) -> Self {
        let defaults = AppConfig::default();
        Self {
            repository,
            event_bus: EventBus::new(),
            sides: defaults.sides,
            match_limit: defaults.match_limit,
        }
    }

    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.sides = config.sides.clone();
        self.match_limit = config.match_limit;
        self
    }

    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = event_bus;
        self
    }

    pub fn with_sides(mut self, sides: RivalrySides) -> Self {
        self.sides = sides;
        self
    }

    pub fn with_match_limit(mut self, match_limit: usize) -> Self {
        self.match_limit = match_limit.max(1);
        self
    }

    pub fn build(self) -> RivalryService {
        RivalryService {
            repository: self.repository,
            event_bus: self.event_bus,
            sides: self.sides,
            match_limit: self.match_limit,
        }
    }
}
