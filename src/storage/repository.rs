use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::{MatchRecord, NewMatch, RivalryError};

#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Stores a finished match and returns it with its assigned id
    async fn insert(&self, new_match: NewMatch) -> Result<MatchRecord, RivalryError>;

    /// Most recent matches of a table, newest first
    async fn list_matches(
        &self,
        table_id: &str,
        limit: usize,
    ) -> Result<Vec<MatchRecord>, RivalryError>;
}

#[derive(Debug, Default)]
pub struct InMemoryMatchRepository {
    /// A mapping from table ID to its matches, kept oldest first
    tables: Arc<RwLock<HashMap<String, Vec<MatchRecord>>>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    #[instrument(skip(self, new_match))]
    async fn insert(&self, new_match: NewMatch) -> Result<MatchRecord, RivalryError> {
        if new_match.table_id.trim().is_empty() {
            return Err(RivalryError::Validation(
                "Table ID cannot be empty".to_string(),
            ));
        }
        if new_match.side_a_id == new_match.side_b_id {
            return Err(RivalryError::Validation(
                "A match needs two different sides".to_string(),
            ));
        }
        if new_match.winner_id != new_match.side_a_id && new_match.winner_id != new_match.side_b_id
        {
            return Err(RivalryError::Validation(format!(
                "Winner {} did not play in this match",
                new_match.winner_id
            )));
        }

        let record = new_match.into_record(Uuid::new_v4().to_string());

        let mut tables = self.tables.write().await;
        let matches = tables.entry(record.table_id.clone()).or_default();
        // keep chronological order even when an older match is entered late
        let position = matches.partition_point(|existing| existing.played_at <= record.played_at);
        matches.insert(position, record.clone());

        debug!(match_id = %record.id, stored = matches.len(), "Match stored");
        Ok(record)
    }

    async fn list_matches(
        &self,
        table_id: &str,
        limit: usize,
    ) -> Result<Vec<MatchRecord>, RivalryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table_id)
            .map(|matches| matches.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
