use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::question_source::{PickOrder, QuestionSource, StaticQuestionSource};
use crate::rounds::QuizLoopService;
use crate::statistics_service::StatisticsStore;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    statistics: Arc<StatisticsStore>,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the bundled movie bank.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        order: PickOrder,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, order))
    }

    /// Services that forget everything when dropped.
    #[must_use]
    pub fn in_memory(clock: Clock, order: PickOrder) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, order)
    }

    fn from_storage(storage: &Storage, clock: Clock, order: PickOrder) -> Self {
        let source: Arc<dyn QuestionSource> =
            Arc::new(StaticQuestionSource::movies().with_order(order));
        Self::with_source(storage, clock, source)
    }

    /// Use a custom question source.
    #[must_use]
    pub fn with_source(storage: &Storage, clock: Clock, source: Arc<dyn QuestionSource>) -> Self {
        let statistics = Arc::new(StatisticsStore::new(
            clock,
            Arc::clone(&storage.statistics),
        ));
        let quiz_loop = Arc::new(QuizLoopService::new(source, Arc::clone(&statistics)));
        Self {
            statistics,
            quiz_loop,
        }
    }

    #[must_use]
    pub fn statistics(&self) -> Arc<StatisticsStore> {
        Arc::clone(&self.statistics)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}
