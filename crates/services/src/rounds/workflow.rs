use std::fmt;
use std::sync::Arc;

use quiz_core::model::{Question, QuizSession, RoundError, RoundResult};
use tracing::debug;

use super::progress::RoundProgress;
use super::view::{QuizResultView, QuizStepView};
use crate::error::QuizError;
use crate::question_source::QuestionSource;
use crate::statistics_service::StatisticsStore;

/// One round in play: the session tally plus the question on screen.
pub struct QuizRound {
    session: QuizSession,
    current: Option<Question>,
}

impl QuizRound {
    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// View of the question on screen, if one is loaded.
    #[must_use]
    pub fn step_view(&self) -> Option<QuizStepView> {
        self.current.as_ref().map(|q| {
            QuizStepView::new(
                q,
                self.session.current_index(),
                self.session.total_questions(),
            )
        })
    }

    #[must_use]
    pub fn progress(&self) -> RoundProgress {
        RoundProgress::of(&self.session)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }
}

impl fmt::Debug for QuizRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizRound")
            .field("index", &self.session.current_index())
            .field("total", &self.session.total_questions())
            .field("correct", &self.session.correct_count())
            .field("has_question", &self.current.is_some())
            .finish()
    }
}

/// What comes after an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundStep {
    Question(QuizStepView),
    Finished {
        result: RoundResult,
        view: QuizResultView,
        is_new_best: bool,
    },
}

/// Result of answering a single question.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerResult {
    /// Drives the pass/fail feedback shown before moving on.
    pub is_correct: bool,
    pub next: RoundStep,
}

/// Orchestrates rounds: pulls questions, scores answers and records finished
/// rounds in the statistics store.
#[derive(Clone)]
pub struct QuizLoopService {
    source: Arc<dyn QuestionSource>,
    statistics: Arc<StatisticsStore>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, statistics: Arc<StatisticsStore>) -> Self {
        Self { source, statistics }
    }

    #[must_use]
    pub fn statistics(&self) -> Arc<StatisticsStore> {
        Arc::clone(&self.statistics)
    }

    /// Start a round sized to the source's question count and load the first
    /// question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Round` if the source declares no questions, and
    /// `Source`/`SourceExhausted` if the first question cannot be loaded.
    pub async fn start_round(&self) -> Result<QuizRound, QuizError> {
        self.source.rewind();
        let mut session = QuizSession::new();
        session.start(self.source.question_count())?;

        let first = self.fetch_question().await?;
        Ok(QuizRound {
            session,
            current: Some(first),
        })
    }

    /// Answer the question on screen and move on.
    ///
    /// Scoring and advancing happen together, so a question cannot be
    /// answered twice. On the last question the round is recorded and the
    /// summary returned.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Round(RoundAlreadyComplete)` after the last
    /// question, `NoCurrentQuestion` if the previous load failed (see
    /// [`QuizLoopService::reload_question`]), source errors while loading the
    /// next question, and statistics errors while recording.
    pub async fn answer_current(
        &self,
        round: &mut QuizRound,
        answer: bool,
    ) -> Result<AnswerResult, QuizError> {
        if round.session.is_complete() {
            return Err(RoundError::RoundAlreadyComplete.into());
        }
        let expected = round
            .current
            .as_ref()
            .ok_or(QuizError::NoCurrentQuestion)?
            .correct_answer();

        let is_correct = round.session.answer_and_advance(answer, expected)?;
        round.current = None;
        debug!(
            index = round.session.current_index(),
            is_correct, "question answered"
        );

        if round.session.is_complete() {
            let result = round.session.finish()?;
            let recorded = self.statistics.record_round(result).await?;
            let view = QuizResultView::new(result, &recorded.statistics);
            return Ok(AnswerResult {
                is_correct,
                next: RoundStep::Finished {
                    result,
                    view,
                    is_new_best: recorded.is_new_best,
                },
            });
        }

        let step = self.reload_question(round).await?;
        Ok(AnswerResult {
            is_correct,
            next: RoundStep::Question(step),
        })
    }

    /// Load the question for the current step, replacing any loaded one.
    ///
    /// Used after a failed load to retry from an error dialog.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Round(RoundAlreadyComplete)` for a finished round,
    /// or `Source`/`SourceExhausted` if loading fails again.
    pub async fn reload_question(&self, round: &mut QuizRound) -> Result<QuizStepView, QuizError> {
        if round.session.is_complete() {
            return Err(RoundError::RoundAlreadyComplete.into());
        }
        let question = self.fetch_question().await?;
        let step = QuizStepView::new(
            &question,
            round.session.current_index(),
            round.session.total_questions(),
        );
        round.current = Some(question);
        Ok(step)
    }

    async fn fetch_question(&self) -> Result<Question, QuizError> {
        self.source
            .next_question()
            .await?
            .ok_or(QuizError::SourceExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuestionSourceError;
    use crate::question_source::StaticQuestionSource;
    use async_trait::async_trait;
    use quiz_core::time::fixed_clock;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn service(source: impl QuestionSource + 'static) -> QuizLoopService {
        QuizLoopService::new(
            Arc::new(source),
            Arc::new(StatisticsStore::in_memory(fixed_clock())),
        )
    }

    /// Fails every `fail_on`-th fetch.
    struct FlakySource {
        calls: AtomicU32,
        fail_on: u32,
    }

    #[async_trait]
    impl QuestionSource for FlakySource {
        fn question_count(&self) -> u32 {
            3
        }

        async fn next_question(&self) -> Result<Option<Question>, QuestionSourceError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n % self.fail_on == 0 {
                return Err(QuestionSourceError::Unavailable("offline".into()));
            }
            Ok(Some(Question::rating("Movie", true)))
        }
    }

    #[tokio::test]
    async fn full_round_records_statistics() {
        let svc = service(StaticQuestionSource::movies());
        let mut round = svc.start_round().await.unwrap();
        assert_eq!(round.step_view().unwrap().counter, "1/10");

        let mut last = None;
        while !round.is_complete() {
            let answer = round.current_question().unwrap().correct_answer();
            last = Some(svc.answer_current(&mut round, answer).await.unwrap());
        }

        let Some(AnswerResult {
            is_correct: true,
            next: RoundStep::Finished {
                result,
                is_new_best,
                view,
            },
        }) = last
        else {
            panic!("round did not finish");
        };
        assert_eq!(result, RoundResult::new(10, 10));
        assert!(is_new_best);
        assert!(view.text.starts_with("Perfect!"));
        assert_eq!(svc.statistics().games_played().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn answers_after_completion_are_rejected() {
        let svc = service(StaticQuestionSource::new(vec![Question::rating("A", true)]));
        let mut round = svc.start_round().await.unwrap();
        svc.answer_current(&mut round, false).await.unwrap();

        let err = svc.answer_current(&mut round, true).await.unwrap_err();
        assert!(matches!(
            err,
            QuizError::Round(RoundError::RoundAlreadyComplete)
        ));
        assert_eq!(svc.statistics().games_played().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_source_cannot_start() {
        let svc = service(StaticQuestionSource::new(Vec::new()));
        let err = svc.start_round().await.unwrap_err();
        assert!(matches!(
            err,
            QuizError::Round(RoundError::InvalidConfiguration)
        ));
    }

    #[tokio::test]
    async fn failed_load_can_be_retried() {
        let svc = service(FlakySource {
            calls: AtomicU32::new(0),
            fail_on: 2,
        });
        let mut round = svc.start_round().await.unwrap();

        let err = svc.answer_current(&mut round, true).await.unwrap_err();
        assert!(err.is_load_failure());
        assert!(round.current_question().is_none());
        assert_eq!(round.progress().answered, 1);

        let err = svc.answer_current(&mut round, true).await.unwrap_err();
        assert!(matches!(err, QuizError::NoCurrentQuestion));
        assert_eq!(round.session().correct_count(), 1);

        let step = svc.reload_question(&mut round).await.unwrap();
        assert_eq!(step.counter, "2/3");
    }

    #[tokio::test]
    async fn each_round_starts_from_the_top() {
        let svc = service(StaticQuestionSource::new(vec![
            Question::rating("A", true),
            Question::rating("B", false),
            Question::rating("C", true),
        ]));
        let mut round = svc.start_round().await.unwrap();
        svc.answer_current(&mut round, true).await.unwrap();

        let round = svc.start_round().await.unwrap();
        assert_eq!(
            round.current_question().unwrap(),
            &Question::rating("A", true)
        );
        assert_eq!(round.progress().answered, 0);
    }
}
