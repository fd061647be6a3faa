//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{RoundError, StatisticsError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by a `QuestionSource`.
///
/// The engine does not look inside these; they are shown to the player as a
/// generic load failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionSourceError {
    #[error("question source unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted by `StatisticsStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatisticsServiceError {
    #[error(transparent)]
    Statistics(#[from] StatisticsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while playing a round.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question source has no more questions")]
    SourceExhausted,
    #[error("no question is loaded for the current step")]
    NoCurrentQuestion,
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Source(#[from] QuestionSourceError),
    #[error(transparent)]
    Statistics(#[from] StatisticsServiceError),
}

impl QuizError {
    /// Whether the failure came from loading questions, which the player can
    /// retry from an error dialog.
    #[must_use]
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::SourceExhausted | Self::Source(_))
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
