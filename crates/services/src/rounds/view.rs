use chrono::{DateTime, Utc};

use quiz_core::model::{Media, Question, RoundResult, StatisticsSnapshot};

/// What the presentation layer shows for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizStepView {
    pub prompt: String,
    pub media: Media,
    /// One-based position, e.g. `"3/10"`.
    pub counter: String,
}

impl QuizStepView {
    /// `index` is zero-based.
    #[must_use]
    pub fn new(question: &Question, index: u32, total: u32) -> Self {
        Self {
            prompt: question.prompt().to_owned(),
            media: question.media().clone(),
            counter: format!("{}/{total}", index + 1),
        }
    }
}

/// End-of-round dialog contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResultView {
    pub title: String,
    pub text: String,
    pub button_text: String,
}

impl QuizResultView {
    /// Build the summary for a finished round.
    ///
    /// `statistics` must already include `result`.
    #[must_use]
    pub fn new(result: RoundResult, statistics: &StatisticsSnapshot) -> Self {
        let congratulation = if result.is_perfect() {
            "Perfect!"
        } else {
            "Try again!"
        };

        let best = statistics.best_game();
        let best_line = if best.total() == 0 {
            "Best game: none yet".to_owned()
        } else {
            format!(
                "Best game: {}/{} ({})",
                best.correct(),
                best.total(),
                format_record_date(best.date())
            )
        };

        let accuracy_line = match statistics.average_accuracy_percent() {
            Ok(avg) => format!("Average accuracy: {avg:.2}%"),
            Err(_) => "Average accuracy: n/a".to_owned(),
        };

        let text = [
            congratulation.to_owned(),
            format!("Your result: {}/{}", result.correct, result.total),
            format!("Games played: {}", statistics.games_played()),
            best_line,
            accuracy_line,
        ]
        .join("\n");

        Self {
            title: "This round is over!".to_owned(),
            text,
            button_text: "Play again".to_owned(),
        }
    }
}

/// Dialog shown when questions cannot be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub title: String,
    pub text: String,
    pub button_text: String,
}

impl Default for ErrorView {
    fn default() -> Self {
        Self {
            title: "Something went wrong".to_owned(),
            text: "Unable to load data".to_owned(),
            button_text: "Try again".to_owned(),
        }
    }
}

/// `dd.MM.yy HH:mm`, as shown next to the best game.
#[must_use]
pub fn format_record_date(value: DateTime<Utc>) -> String {
    value.format("%d.%m.%y %H:%M").to_string()
}
