use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::CoreError;
use crate::model::{CourseId, CourseTemplate, RoundAggregate, Tees};
use crate::storage::RoundStore;

/// Round lifecycle on top of a `RoundStore`: start, save, finish, delete, list.
#[derive(Clone)]
pub struct RoundService {
    store: Arc<dyn RoundStore>,
}

impl RoundService {
    #[must_use]
    pub fn new(store: Arc<dyn RoundStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> Arc<dyn RoundStore> {
        Arc::clone(&self.store)
    }

    /// Copies the course's holes into a new, unsaved round.
    #[must_use]
    pub fn create_new_round(&self, course: &CourseTemplate, tees: Tees) -> RoundAggregate {
        let round = RoundAggregate::start(course, tees);
        info!(round_id = %round.round_id, course = %course.name, "new round created");
        round
    }

    /// Creates a round and persists it straight away so it shows up as in progress.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Storage` if the first save fails.
    pub async fn start_round(
        &self,
        course: &CourseTemplate,
        tees: Tees,
    ) -> Result<RoundAggregate, CoreError> {
        let round = self.create_new_round(course, tees);
        self.save_round(&round).await?;
        Ok(round)
    }

    /// # Errors
    ///
    /// Returns `CoreError::Storage` if the store rejects the write. The round is left as is.
    pub async fn save_round(&self, round: &RoundAggregate) -> Result<(), CoreError> {
        match self.store.save(round).await {
            Ok(()) => {
                info!(round_id = %round.round_id, "round saved");
                Ok(())
            }
            Err(e) => {
                error!(round_id = %round.round_id, error = %e, "error saving round");
                Err(e.into())
            }
        }
    }

    /// Marks the round complete and saves it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Storage` if the save fails.
    pub async fn complete_round(&self, round: &mut RoundAggregate) -> Result<(), CoreError> {
        round.complete();
        self.save_round(round).await?;
        info!(round_id = %round.round_id, total = round.total_score(), "round completed");
        Ok(())
    }

    /// Finishes the round before the last hole and saves it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Storage` if the save fails.
    pub async fn end_round(&self, round: &mut RoundAggregate) -> Result<(), CoreError> {
        round.end_early();
        self.save_round(round).await?;
        info!(round_id = %round.round_id, holes_scored = round.num_holes_scored(), "round ended");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `CoreError::Storage` if the round is unknown or the delete fails.
    pub async fn delete_round(&self, round_id: Uuid) -> Result<(), CoreError> {
        match self.store.delete(round_id).await {
            Ok(()) => {
                info!(%round_id, "round deleted");
                Ok(())
            }
            Err(e) => {
                error!(%round_id, error = %e, "error deleting round");
                Err(e.into())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Storage` if the store cannot be read.
    pub async fn round(&self, round_id: Uuid) -> Result<Option<RoundAggregate>, CoreError> {
        Ok(self.store.fetch(round_id).await?)
    }

    /// Like `round`, but a missing round is an error.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown id, `CoreError::Storage` if the store cannot be read.
    pub async fn require_round(&self, round_id: Uuid) -> Result<RoundAggregate, CoreError> {
        self.round(round_id).await?.ok_or_else(|| {
            warn!(%round_id, "round not found");
            CoreError::NotFound(format!("round {round_id}"))
        })
    }

    /// All rounds, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Storage` if the store cannot be read.
    pub async fn all_rounds(&self) -> Result<Vec<RoundAggregate>, CoreError> {
        self.store.fetch_all().await.map_err(|e| {
            error!(error = %e, "error fetching all rounds");
            CoreError::from(e)
        })
    }

    /// # Errors
    ///
    /// Returns `CoreError::Storage` if the store cannot be read.
    pub async fn rounds_by_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<RoundAggregate>, CoreError> {
        let mut rounds = self.all_rounds().await?;
        rounds.retain(|r| r.course_id == course_id);
        Ok(rounds)
    }
}
