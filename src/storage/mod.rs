pub mod memory;
pub mod sqlite;

pub use memory::MemoryRoundStore;
pub use sqlite::SqliteRoundStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::model::RoundAggregate;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("round {0} not found")]
    NotFound(Uuid),
    #[error("backend failure: {0}")]
    Backend(String),
    #[error("could not encode or decode round: {0}")]
    Serialization(String),
}

impl StorageError {
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Durable home for rounds. A round and its holes are written and removed together.
#[async_trait]
pub trait RoundStore: Send + Sync {
    /// Inserts the round, or replaces every stored field and hole of an existing one.
    async fn save(&self, round: &RoundAggregate) -> Result<(), StorageError>;
    /// Removes the round and its holes. Fails with `NotFound` for unknown ids.
    async fn delete(&self, round_id: Uuid) -> Result<(), StorageError>;
    async fn fetch(&self, round_id: Uuid) -> Result<Option<RoundAggregate>, StorageError>;
    /// Every stored round, most recent `date` first.
    async fn fetch_all(&self) -> Result<Vec<RoundAggregate>, StorageError>;
}
