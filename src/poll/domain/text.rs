//! Validated display text for questions and choices.

use super::PollDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum character count for question text.
pub const MAX_QUESTION_TEXT_CHARS: usize = 200;

/// Maximum character count for choice text.
pub const MAX_CHOICE_TEXT_CHARS: usize = 200;

/// Trimmed, non-empty question prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionText(String);

impl QuestionText {
    /// Creates validated question text.
    ///
    /// # Errors
    ///
    /// Returns [`PollDomainError::EmptyQuestionText`] when the trimmed value
    /// is empty, or [`PollDomainError::QuestionTextTooLong`] when it exceeds
    /// [`MAX_QUESTION_TEXT_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, PollDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(PollDomainError::EmptyQuestionText);
        }
        let length = normalized.chars().count();
        if length > MAX_QUESTION_TEXT_CHARS {
            return Err(PollDomainError::QuestionTextTooLong {
                length,
                max: MAX_QUESTION_TEXT_CHARS,
            });
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the text as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for QuestionText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for QuestionText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty answer label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceText(String);

impl ChoiceText {
    /// Creates validated choice text.
    ///
    /// # Errors
    ///
    /// Returns [`PollDomainError::EmptyChoiceText`] when the trimmed value is
    /// empty, or [`PollDomainError::ChoiceTextTooLong`] when it exceeds
    /// [`MAX_CHOICE_TEXT_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, PollDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(PollDomainError::EmptyChoiceText);
        }
        let length = normalized.chars().count();
        if length > MAX_CHOICE_TEXT_CHARS {
            return Err(PollDomainError::ChoiceTextTooLong {
                length,
                max: MAX_CHOICE_TEXT_CHARS,
            });
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the text as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ChoiceText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ChoiceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
