use std::sync::Mutex;

use async_trait::async_trait;
use quiz_core::model::Question;
use rand::seq::IndexedRandom;

use crate::error::QuestionSourceError;

/// Supplies the questions for a round.
///
/// Implementations may hold a static list or fetch remotely; the round only
/// pulls one question at a time and trusts `question_count` for its length.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Number of questions asked per round.
    fn question_count(&self) -> u32;

    /// Next question, or `None` when the source has nothing left.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError` when questions cannot be produced.
    async fn next_question(&self) -> Result<Option<Question>, QuestionSourceError>;

    /// Called before each round starts.
    fn rewind(&self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickOrder {
    /// Walk the list in order, wrapping around at the end.
    #[default]
    Sequential,
    /// Pick uniformly at random each time; repeats are possible.
    Random,
}

/// Question source backed by an in-memory list.
#[derive(Debug)]
pub struct StaticQuestionSource {
    questions: Vec<Question>,
    order: PickOrder,
    cursor: Mutex<usize>,
}

impl StaticQuestionSource {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            order: PickOrder::Sequential,
            cursor: Mutex::new(0),
        }
    }

    /// The bundled movie bank: six movies rated above 6, four below.
    #[must_use]
    pub fn movies() -> Self {
        Self::new(vec![
            Question::rating("The Godfather", true),
            Question::rating("The Dark Knight", true),
            Question::rating("Kill Bill", true),
            Question::rating("The Avengers", true),
            Question::rating("Deadpool", true),
            Question::rating("The Green Knight", true),
            Question::rating("Old", false),
            Question::rating("The Ice Age Adventures of Buck Wild", false),
            Question::rating("Tesla", false),
            Question::rating("Vivarium", false),
        ])
    }

    #[must_use]
    pub fn with_order(mut self, order: PickOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    fn next_sequential(&self) -> Result<Option<Question>, QuestionSourceError> {
        let mut cursor = self
            .cursor
            .lock()
            .map_err(|e| QuestionSourceError::Unavailable(e.to_string()))?;
        let question = self.questions[*cursor % self.questions.len()].clone();
        *cursor = (*cursor + 1) % self.questions.len();
        Ok(Some(question))
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    fn question_count(&self) -> u32 {
        u32::try_from(self.questions.len()).unwrap_or(u32::MAX)
    }

    async fn next_question(&self) -> Result<Option<Question>, QuestionSourceError> {
        if self.questions.is_empty() {
            return Ok(None);
        }
        match self.order {
            PickOrder::Sequential => self.next_sequential(),
            PickOrder::Random => Ok(self.questions.choose(&mut rand::rng()).cloned()),
        }
    }

    fn rewind(&self) {
        if let Ok(mut cursor) = self.cursor.lock() {
            *cursor = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn movie_bank_has_ten_questions() {
        let source = StaticQuestionSource::movies();
        assert_eq!(source.question_count(), 10);
        let yes = source
            .questions()
            .iter()
            .filter(|q| q.correct_answer())
            .count();
        assert_eq!(yes, 6);
    }

    #[tokio::test]
    async fn sequential_wraps_and_rewinds() {
        let source = StaticQuestionSource::new(vec![
            Question::rating("A", true),
            Question::rating("B", false),
        ]);
        let first = source.next_question().await.unwrap().unwrap();
        let second = source.next_question().await.unwrap().unwrap();
        let third = source.next_question().await.unwrap().unwrap();
        assert_eq!(first, third);
        assert_ne!(first, second);

        source.next_question().await.unwrap();
        source.next_question().await.unwrap();
        source.rewind();
        assert_eq!(source.next_question().await.unwrap().unwrap(), first);
    }

    #[tokio::test]
    async fn random_pick_comes_from_the_list() {
        let source = StaticQuestionSource::movies().with_order(PickOrder::Random);
        for _ in 0..25 {
            let q = source.next_question().await.unwrap().unwrap();
            assert!(source.questions().contains(&q));
        }
    }

    #[tokio::test]
    async fn empty_source_yields_none() {
        let source = StaticQuestionSource::new(Vec::new());
        assert_eq!(source.question_count(), 0);
        assert!(source.next_question().await.unwrap().is_none());
    }
}
