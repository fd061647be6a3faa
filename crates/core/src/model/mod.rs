mod game_record;
mod question;
mod round;
mod statistics;

pub use game_record::GameRecord;
pub use question::{DEFAULT_PROMPT, Media, Question, QuestionError};
pub use round::{QuizSession, RoundError, RoundResult, RoundState, RoundTally};
pub use statistics::{StatisticsError, StatisticsSnapshot};
