//! Error types for poll domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain poll values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PollDomainError {
    /// The question text is empty after trimming.
    #[error("question text must not be empty")]
    EmptyQuestionText,

    /// The question text exceeds the persisted column width.
    #[error("question text is {length} characters, maximum is {max}")]
    QuestionTextTooLong {
        /// Character count of the rejected text.
        length: usize,
        /// Maximum accepted character count.
        max: usize,
    },

    /// The choice text is empty after trimming.
    #[error("choice text must not be empty")]
    EmptyChoiceText,

    /// The choice text exceeds the persisted column width.
    #[error("choice text is {length} characters, maximum is {max}")]
    ChoiceTextTooLong {
        /// Character count of the rejected text.
        length: usize,
        /// Maximum accepted character count.
        max: usize,
    },

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A vote count cannot be incremented any further.
    #[error("vote count overflow for choice {0}")]
    VoteCountOverflow(String),
}
