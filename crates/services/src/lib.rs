#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod question_source;
pub mod rounds;
pub mod statistics_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuestionSourceError, QuizError, StatisticsServiceError};
pub use question_source::{PickOrder, QuestionSource, StaticQuestionSource};
pub use statistics_service::{RecordedRound, StatisticsStore};

pub use rounds::{
    AnswerResult, ErrorView, QuizLoopService, QuizResultView, QuizRound, QuizStepView,
    RoundProgress, RoundStep,
};
