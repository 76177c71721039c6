use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use super::events::RivalryEvent;

const DEFAULT_TABLE_CAPACITY: usize = 100;

/// Per-table broadcast of rivalry events
#[derive(Debug, Clone)]
pub struct EventBus {
    /// Table-specific event channels: table_id -> sender
    table_channels: Arc<RwLock<HashMap<String, broadcast::Sender<RivalryEvent>>>>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TABLE_CAPACITY)
    }

    /// Creates a bus whose per-table channels buffer `capacity` events
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table_channels: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Emits an event to all subscribers of the event's table. Channels are
    /// only created by `subscribe`, and one whose receivers are all gone is
    /// dropped here.
    pub async fn emit(&self, event: RivalryEvent) {
        let table_id = event.table_id().to_string();
        let sender = self.table_channels.read().await.get(&table_id).cloned();

        let Some(sender) = sender else {
            debug!(table_id = %table_id, "Table event emitted with no receivers");
            return;
        };

        match sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    table_id = %table_id,
                    receivers = receiver_count,
                    "Table event emitted"
                );
            }
            Err(_) => {
                let mut table_channels = self.table_channels.write().await;
                if table_channels
                    .get(&table_id)
                    .is_some_and(|sender| sender.receiver_count() == 0)
                {
                    table_channels.remove(&table_id);
                    debug!(table_id = %table_id, "Removed table channel without receivers");
                }
            }
        }
    }

    /// Number of tables with an open channel
    pub async fn table_count(&self) -> usize {
        self.table_channels.read().await.len()
    }

    /// Subscribe to events for a specific table
    pub async fn subscribe(&self, table_id: &str) -> broadcast::Receiver<RivalryEvent> {
        self.sender(table_id).await.subscribe()
    }

    async fn sender(&self, table_id: &str) -> broadcast::Sender<RivalryEvent> {
        {
            let table_channels = self.table_channels.read().await;
            if let Some(sender) = table_channels.get(table_id) {
                return sender.clone();
            }
        }

        debug!(table_id = %table_id, "Creating new table channel");
        let mut table_channels = self.table_channels.write().await;
        table_channels
            .entry(table_id.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }
}
