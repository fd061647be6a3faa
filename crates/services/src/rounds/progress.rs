use quiz_core::model::QuizSession;

/// Aggregated view of round progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundProgress {
    pub total: u32,
    pub answered: u32,
    pub remaining: u32,
    pub correct: u32,
    pub is_complete: bool,
}

impl RoundProgress {
    #[must_use]
    pub fn of(session: &QuizSession) -> Self {
        let total = session.total_questions();
        let answered = session.current_index();
        Self {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            correct: session.correct_count(),
            is_complete: session.is_complete(),
        }
    }
}
