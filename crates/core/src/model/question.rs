use thiserror::Error;

/// Prompt used by every movie question unless one is given explicitly.
pub const DEFAULT_PROMPT: &str = "Is the rating of this movie greater than 6?";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,
}

/// Media shown alongside a question.
///
/// The engine never inspects it; the presentation layer resolves an asset
/// name or decodes the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    /// Name of a bundled asset, e.g. a poster image.
    Asset(String),
    /// Raw bytes fetched by the question source.
    Bytes(Vec<u8>),
}

/// A yes/no quiz question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    media: Media,
    correct_answer: bool,
}

impl Question {
    /// Build a question with a custom prompt.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` if the prompt is blank.
    pub fn new(
        prompt: impl Into<String>,
        media: Media,
        correct_answer: bool,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into().trim().to_owned();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        Ok(Self {
            prompt,
            media,
            correct_answer,
        })
    }

    /// A movie rating question for a bundled poster asset.
    #[must_use]
    pub fn rating(asset: impl Into<String>, correct_answer: bool) -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_owned(),
            media: Media::Asset(asset.into()),
            correct_answer,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn media(&self) -> &Media {
        &self.media
    }

    #[must_use]
    pub fn correct_answer(&self) -> bool {
        self.correct_answer
    }

    #[must_use]
    pub fn is_correct(&self, answer: bool) -> bool {
        answer == self.correct_answer
    }
}
