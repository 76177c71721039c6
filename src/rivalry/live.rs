use std::sync::Arc;
use tokio::sync::{broadcast::error::RecvError, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::service::{RivalryService, RivalrySnapshot};
use crate::domain::RivalryError;

/// Statistics for one table that refresh whenever a match is recorded there.
///
/// Every event triggers a full recomputation from storage, so a missed or
/// lagged event only delays the refresh.
pub struct LiveRivalry {
    table_id: String,
    receiver: watch::Receiver<RivalrySnapshot>,
    task: JoinHandle<()>,
}

impl LiveRivalry {
    /// Computes the initial snapshot and starts listening for new matches
    pub async fn spawn(
        service: Arc<RivalryService>,
        table_id: impl Into<String>,
    ) -> Result<Self, RivalryError> {
        let table_id = table_id.into();

        // Subscribe first so nothing recorded during the initial fetch is lost
        let mut events = service.event_bus().subscribe(&table_id).await;
        let initial = service.snapshot(&table_id).await?;
        let (sender, receiver) = watch::channel(initial);

        let task_table = table_id.clone();
        let task = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        debug!(
                            table_id = %task_table,
                            event_type = event.event_type(),
                            "Refreshing rivalry statistics"
                        );
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(
                            table_id = %task_table,
                            skipped,
                            "Live rivalry lagged behind events"
                        );
                    }
                    Err(RecvError::Closed) => break,
                }

                match service.snapshot(&task_table).await {
                    Ok(snapshot) => {
                        if sender.send(snapshot).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!(
                            table_id = %task_table,
                            error = %e,
                            "Failed to refresh rivalry statistics"
                        );
                    }
                }
            }
            debug!(table_id = %task_table, "Live rivalry stopped");
        });

        info!(table_id = %table_id, "Live rivalry started");
        Ok(Self {
            table_id,
            receiver,
            task,
        })
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    /// Most recently computed snapshot
    pub fn latest(&self) -> RivalrySnapshot {
        self.receiver.borrow().clone()
    }

    /// A receiver that is notified on every refresh
    pub fn subscribe(&self) -> watch::Receiver<RivalrySnapshot> {
        self.receiver.clone()
    }
}

impl Drop for LiveRivalry {
    fn drop(&mut self) {
        self.task.abort();
    }
}
