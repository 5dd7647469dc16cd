use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RoundStore, StorageError};
use crate::model::RoundAggregate;

pub type RoundDocMap = Arc<RwLock<HashMap<Uuid, String>>>;

/// Keeps each round as a JSON document keyed by its id.
#[derive(Clone, Default)]
pub struct MemoryRoundStore {
    docs: RoundDocMap,
}

impl MemoryRoundStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

#[async_trait]
impl RoundStore for MemoryRoundStore {
    async fn save(&self, round: &RoundAggregate) -> Result<(), StorageError> {
        let payload = serde_json::to_string(round)?;
        self.docs.write().await.insert(round.round_id, payload);
        Ok(())
    }

    async fn delete(&self, round_id: Uuid) -> Result<(), StorageError> {
        self.docs
            .write()
            .await
            .remove(&round_id)
            .map(|_| ())
            .ok_or(StorageError::NotFound(round_id))
    }

    async fn fetch(&self, round_id: Uuid) -> Result<Option<RoundAggregate>, StorageError> {
        let map = self.docs.read().await;
        map.get(&round_id)
            .map(|doc| serde_json::from_str(doc).map_err(StorageError::from))
            .transpose()
    }

    async fn fetch_all(&self) -> Result<Vec<RoundAggregate>, StorageError> {
        let map = self.docs.read().await;
        let mut rounds = map
            .values()
            .map(|doc| serde_json::from_str::<RoundAggregate>(doc))
            .collect::<Result<Vec<_>, _>>()?;
        rounds.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rounds)
    }
}
