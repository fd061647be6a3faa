mod progress;
mod view;
mod workflow;

// Public API of the round subsystem.
pub use crate::error::QuizError;
pub use progress::RoundProgress;
pub use view::{ErrorView, QuizResultView, QuizStepView, format_record_date};
pub use workflow::{AnswerResult, QuizLoopService, QuizRound, RoundStep};
