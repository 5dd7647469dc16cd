use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};

use super::autosave::SaveQueue;
use super::scoring::{Deps, Msg, Outcome, RoundEvent, ScoringModel, run_effect, settle, update};
use crate::error::CoreError;
use crate::model::RoundAggregate;
use crate::storage::RoundStore;

/// Runs the MVU loop for a scoring session: seeds with `init_msg` and drains effects.
///
/// # Errors
///
/// Returns the error of a failed final save. The model keeps the finished round
/// so the caller can retry with another `Finish`.
pub(crate) async fn run_scoring(
    model: &mut ScoringModel,
    init_msg: Msg,
    deps: Deps<'_>,
) -> Result<(), CoreError> {
    trace!(msg = ?init_msg, "scoring update");
    let mut effects = update(model, init_msg);
    while let Some(effect) = effects.pop() {
        trace!(effect = ?effect, "effect start");
        let Some(outcome) = run_effect(effect, model, deps).await else {
            continue;
        };
        trace!(outcome = ?outcome, "effect done");
        match outcome {
            Outcome::SaveFailed(e) => {
                for effect in settle(model, Outcome::SaveFailed(e.clone())) {
                    run_effect(effect, model, deps).await;
                }
                return Err(e);
            }
            saved => effects.extend(settle(model, saved)),
        }
    }
    Ok(())
}

/// One round being scored, with its save queue and event channel.
pub struct ScoringSession {
    model: ScoringModel,
    saver: SaveQueue,
    events: UnboundedSender<RoundEvent>,
}

impl ScoringSession {
    /// Starts a session for `round`. Must be called from inside a tokio runtime.
    #[must_use]
    pub fn start(
        round: RoundAggregate,
        store: Arc<dyn RoundStore>,
    ) -> (Self, UnboundedReceiver<RoundEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let saver = SaveQueue::spawn(store, events.clone());
        debug!(round_id = %round.round_id, "scoring session started");
        let session = Self {
            model: ScoringModel::new(round),
            saver,
            events,
        };
        (session, rx)
    }

    /// # Errors
    ///
    /// Returns an error only when finishing the round fails to save.
    pub async fn dispatch(&mut self, msg: Msg) -> Result<(), CoreError> {
        let deps = Deps {
            saver: &self.saver,
            events: &self.events,
        };
        run_scoring(&mut self.model, msg, deps).await
    }

    #[must_use]
    pub fn model(&self) -> &ScoringModel {
        &self.model
    }

    #[must_use]
    pub fn round(&self) -> &RoundAggregate {
        &self.model.round
    }

    #[must_use]
    pub fn into_round(self) -> RoundAggregate {
        self.model.round
    }
}
