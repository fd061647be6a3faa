use std::sync::Arc;

use quiz_core::model::{GameRecord, RoundResult, StatisticsSnapshot};
use storage::repository::{InMemoryRepository, StatisticsRepository};
use tracing::info;

use crate::Clock;
use crate::error::StatisticsServiceError;

/// Statistics after a round has been folded in.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRound {
    pub statistics: StatisticsSnapshot,
    pub is_new_best: bool,
}

/// Durable lifetime statistics for the local player.
///
/// Every read goes to the repository; a record loads, folds the round in and
/// saves all fields in one repository call.
#[derive(Clone)]
pub struct StatisticsStore {
    clock: Clock,
    repo: Arc<dyn StatisticsRepository>,
}

impl StatisticsStore {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn StatisticsRepository>) -> Self {
        Self { clock, repo }
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(clock, Arc::new(InMemoryRepository::new()))
    }

    /// Current statistics, zero-valued before the first round.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsServiceError::Storage` on repository failures.
    pub async fn snapshot(&self) -> Result<StatisticsSnapshot, StatisticsServiceError> {
        Ok(self.repo.load_statistics().await?)
    }

    /// Add a finished round, dated by the store's clock.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsServiceError::Statistics` for a result with a zero
    /// total (nothing is saved), or `Storage` if loading or saving fails.
    pub async fn record_round(
        &self,
        result: RoundResult,
    ) -> Result<RecordedRound, StatisticsServiceError> {
        let mut statistics = self.repo.load_statistics().await?;
        let is_new_best = statistics.record_round(result, self.clock.now())?;
        self.repo.save_statistics(&statistics).await?;

        info!(
            correct = result.correct,
            total = result.total,
            games_played = statistics.games_played(),
            is_new_best,
            "round recorded"
        );
        Ok(RecordedRound {
            statistics,
            is_new_best,
        })
    }

    /// # Errors
    ///
    /// Returns `StatisticsServiceError::Statistics` wrapping `NoGamesPlayed`
    /// before the first round, or `Storage` on repository failures.
    pub async fn average_accuracy_percent(&self) -> Result<f64, StatisticsServiceError> {
        Ok(self.snapshot().await?.average_accuracy_percent()?)
    }

    /// # Errors
    ///
    /// Returns `StatisticsServiceError::Storage` on repository failures.
    pub async fn best_game(&self) -> Result<GameRecord, StatisticsServiceError> {
        Ok(*self.snapshot().await?.best_game())
    }

    /// # Errors
    ///
    /// Returns `StatisticsServiceError::Storage` on repository failures.
    pub async fn games_played(&self) -> Result<u32, StatisticsServiceError> {
        Ok(self.snapshot().await?.games_played())
    }
}
