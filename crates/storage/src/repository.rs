use async_trait::async_trait;
use quiz_core::model::StatisticsSnapshot;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the single-profile statistics.
#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    /// Load the persisted statistics.
    ///
    /// Returns zero-value statistics when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or a scalar field
    /// is malformed. A malformed best game is not an error: it loads as the
    /// zero record.
    async fn load_statistics(&self) -> Result<StatisticsSnapshot, StorageError>;

    /// Persist every statistics field as one unit.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails; nothing is written in that case.
    async fn save_statistics(&self, stats: &StatisticsSnapshot) -> Result<(), StorageError>;
}

/// In-memory repository for tests and throwaway sessions.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    statistics: Arc<Mutex<Option<StatisticsSnapshot>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatisticsRepository for InMemoryRepository {
    async fn load_statistics(&self) -> Result<StatisticsSnapshot, StorageError> {
        let guard = self
            .statistics
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone().unwrap_or_default())
    }

    async fn save_statistics(&self, stats: &StatisticsSnapshot) -> Result<(), StorageError> {
        let mut guard = self
            .statistics
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(stats.clone());
        Ok(())
    }
}

/// Repositories behind trait objects so the backend can be swapped.
#[derive(Clone)]
pub struct Storage {
    pub statistics: Arc<dyn StatisticsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let statistics: Arc<dyn StatisticsRepository> = Arc::new(InMemoryRepository::new());
        Self { statistics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::RoundResult;
    use quiz_core::time::fixed_now;

    #[tokio::test]
    async fn empty_repository_loads_zero_values() {
        let repo = InMemoryRepository::new();
        let stats = repo.load_statistics().await.unwrap();
        assert_eq!(stats, StatisticsSnapshot::default());
    }

    #[tokio::test]
    async fn round_trips_statistics() {
        let repo = InMemoryRepository::new();
        let mut stats = StatisticsSnapshot::default();
        stats
            .record_round(RoundResult::new(8, 10), fixed_now())
            .unwrap();
        repo.save_statistics(&stats).await.unwrap();

        let loaded = repo.load_statistics().await.unwrap();
        assert_eq!(loaded, stats);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let storage = Storage::in_memory();
        let other = storage.clone();
        let mut stats = StatisticsSnapshot::default();
        stats
            .record_round(RoundResult::new(1, 2), fixed_now())
            .unwrap();
        storage.statistics.save_statistics(&stats).await.unwrap();

        let loaded = other.statistics.load_statistics().await.unwrap();
        assert_eq!(loaded.games_played(), 1);
    }
}
