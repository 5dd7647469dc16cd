use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::scoring::RoundEvent;
use crate::model::RoundAggregate;
use crate::storage::{RoundStore, StorageError};

enum SaveJob {
    Background(RoundAggregate),
    Awaited(RoundAggregate, oneshot::Sender<Result<(), StorageError>>),
}

/// Single writer for one scoring session. Snapshots are written in the order
/// they were queued, so an older auto-save can never land after the final save.
#[derive(Clone)]
pub struct SaveQueue {
    tx: mpsc::UnboundedSender<SaveJob>,
}

impl SaveQueue {
    /// Spawns the writer task. Must be called from inside a tokio runtime.
    /// The task ends once every `SaveQueue` handle is dropped.
    #[must_use]
    pub fn spawn(store: Arc<dyn RoundStore>, events: mpsc::UnboundedSender<RoundEvent>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<SaveJob>();
        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                match job {
                    SaveJob::Background(round) => {
                        let round_id = round.round_id;
                        let event = match store.save(&round).await {
                            Ok(()) => {
                                debug!(%round_id, "auto-save done");
                                RoundEvent::Saved { round_id }
                            }
                            Err(e) => {
                                warn!(%round_id, error = %e, "auto-save failed");
                                RoundEvent::SaveFailed {
                                    round_id,
                                    reason: e.to_string(),
                                }
                            }
                        };
                        // listener may be gone; the save itself still counts
                        let _ = events.send(event);
                    }
                    SaveJob::Awaited(round, reply) => {
                        let result = store.save(&round).await;
                        let _ = reply.send(result);
                    }
                }
            }
        });
        Self { tx }
    }

    /// Fire-and-forget: returns immediately, the outcome arrives as a `RoundEvent`.
    pub fn queue(&self, round: RoundAggregate) {
        if self.tx.send(SaveJob::Background(round)).is_err() {
            warn!("auto-save queue closed, snapshot dropped");
        }
    }

    /// Waits until everything queued before it, and this snapshot, are written.
    ///
    /// # Errors
    ///
    /// Returns the store's error, or `StorageError::Backend` if the writer is gone.
    pub async fn save_now(&self, round: RoundAggregate) -> Result<(), StorageError> {
        let (reply, done) = oneshot::channel();
        self.tx
            .send(SaveJob::Awaited(round, reply))
            .map_err(|_| StorageError::backend("save queue closed"))?;
        done.await
            .map_err(|_| StorageError::backend("save queue dropped the request"))?
    }
}
