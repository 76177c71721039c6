use serde::{Deserialize, Serialize};

use crate::domain::MatchRecord;

/// Facts about a table that other components react to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RivalryEvent {
    /// A finished match has been stored
    MatchRecorded { record: MatchRecord },
}

impl RivalryEvent {
    pub fn table_id(&self) -> &str {
        match self {
            RivalryEvent::MatchRecorded { record } => &record.table_id,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            RivalryEvent::MatchRecorded { .. } => "MatchRecorded",
        }
    }
}
