use thiserror::Error;
use tracing::debug;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("a round needs at least one question")]
    InvalidConfiguration,

    #[error("round has not been started")]
    RoundNotStarted,

    #[error("round is already complete")]
    RoundAlreadyComplete,

    #[error("round is not complete ({done}/{total} questions done)")]
    RoundNotComplete { done: u32, total: u32 },

    #[error("question {index} has already been answered")]
    QuestionAlreadyAnswered { index: u32 },
}

//
// ─── TALLY ────────────────────────────────────────────────────────────────────
//

/// Live position and score within one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTally {
    total_questions: u32,
    current_index: u32,
    correct_count: u32,
}

impl RoundTally {
    fn new(total_questions: u32) -> Result<Self, RoundError> {
        if total_questions == 0 {
            return Err(RoundError::InvalidConfiguration);
        }
        Ok(Self {
            total_questions,
            current_index: 0,
            correct_count: 0,
        })
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn current_index(&self) -> u32 {
        self.current_index
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current_index == self.total_questions
    }
}

/// Final score of a completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub correct: u32,
    pub total: u32,
}

impl RoundResult {
    #[must_use]
    pub fn new(correct: u32, total: u32) -> Self {
        Self { correct, total }
    }

    /// Every question answered correctly.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    NotStarted,
    InProgress,
    Complete,
}

/// Drives one round of yes/no questions.
///
/// Answers are recorded against the current question only, at most once per
/// question. Moving to the next question is a separate step so feedback can be
/// shown in between; [`QuizSession::answer_and_advance`] does both at once.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    tally: Option<RoundTally>,
    answered_current: bool,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a round of `total_questions`, discarding any previous tally.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::InvalidConfiguration` if `total_questions` is zero.
    /// The session is left untouched in that case.
    pub fn start(&mut self, total_questions: u32) -> Result<(), RoundError> {
        let tally = RoundTally::new(total_questions)?;
        self.tally = Some(tally);
        self.answered_current = false;
        debug!(total_questions, "round started");
        Ok(())
    }

    /// Start over with a fresh round. Same as [`QuizSession::start`].
    ///
    /// # Errors
    ///
    /// Returns `RoundError::InvalidConfiguration` if `total_questions` is zero.
    pub fn reset(&mut self, total_questions: u32) -> Result<(), RoundError> {
        self.start(total_questions)
    }

    #[must_use]
    pub fn state(&self) -> RoundState {
        match self.tally {
            None => RoundState::NotStarted,
            Some(t) if t.is_complete() => RoundState::Complete,
            Some(_) => RoundState::InProgress,
        }
    }

    #[must_use]
    pub fn tally(&self) -> Option<RoundTally> {
        self.tally
    }

    /// Zero-based index of the question being asked.
    #[must_use]
    pub fn current_index(&self) -> u32 {
        self.tally.map_or(0, |t| t.current_index)
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.tally.map_or(0, |t| t.total_questions)
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.tally.map_or(0, |t| t.correct_count)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state() == RoundState::Complete
    }

    /// Whether the current question already has an answer recorded.
    #[must_use]
    pub fn is_current_answered(&self) -> bool {
        self.answered_current
    }

    /// Record the answer to the current question. Returns whether it was right.
    ///
    /// # Errors
    ///
    /// Returns `RoundNotStarted` or `RoundAlreadyComplete` outside a running
    /// round, and `QuestionAlreadyAnswered` on a second answer for the same
    /// question.
    pub fn submit_answer(&mut self, user_answer: bool, expected: bool) -> Result<bool, RoundError> {
        let answered = self.answered_current;
        let tally = self.running_tally()?;
        if answered {
            return Err(RoundError::QuestionAlreadyAnswered {
                index: tally.current_index,
            });
        }

        let is_correct = user_answer == expected;
        if is_correct {
            tally.correct_count += 1;
        }
        self.answered_current = true;
        Ok(is_correct)
    }

    /// Move to the next question.
    ///
    /// Skipping a question without answering it is allowed and scores nothing.
    ///
    /// # Errors
    ///
    /// Returns `RoundNotStarted` before `start`, and `RoundAlreadyComplete`
    /// once every question has been passed. Neither mutates the session.
    pub fn advance(&mut self) -> Result<RoundState, RoundError> {
        let tally = self.running_tally()?;
        tally.current_index += 1;
        self.answered_current = false;
        let state = self.state();
        debug!(index = self.current_index(), ?state, "round advanced");
        Ok(state)
    }

    /// Submit and advance in one step.
    ///
    /// # Errors
    ///
    /// Same as [`QuizSession::submit_answer`]. Nothing changes on error.
    pub fn answer_and_advance(
        &mut self,
        user_answer: bool,
        expected: bool,
    ) -> Result<bool, RoundError> {
        let is_correct = self.submit_answer(user_answer, expected)?;
        self.advance()?;
        Ok(is_correct)
    }

    /// Final score of the round.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::RoundNotComplete` until every question is passed.
    pub fn finish(&self) -> Result<RoundResult, RoundError> {
        match self.tally {
            Some(t) if t.is_complete() => Ok(RoundResult::new(t.correct_count, t.total_questions)),
            Some(t) => Err(RoundError::RoundNotComplete {
                done: t.current_index,
                total: t.total_questions,
            }),
            None => Err(RoundError::RoundNotComplete { done: 0, total: 0 }),
        }
    }

    fn running_tally(&mut self) -> Result<&mut RoundTally, RoundError> {
        match self.tally.as_mut() {
            None => Err(RoundError::RoundNotStarted),
            Some(t) if t.is_complete() => Err(RoundError::RoundAlreadyComplete),
            Some(t) => Ok(t),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
