//! Domain model for polls.
//!
//! Questions own their choices. All time-dependent rules take the current
//! instant as an argument, so nothing in the domain reads a clock.

mod choice;
mod error;
mod ids;
mod listing;
mod question;
mod recency;
mod text;

pub use choice::{Choice, MAX_VOTES};
pub use error::PollDomainError;
pub use ids::{ChoiceId, QuestionId};
pub use listing::{LATEST_QUESTIONS_LIMIT, LatestQuestionsQuery};
pub use question::{PersistedQuestionData, Question};
pub use recency::{RECENCY_WINDOW, is_published, is_recently_published};
pub use text::{ChoiceText, MAX_CHOICE_TEXT_CHARS, MAX_QUESTION_TEXT_CHARS, QuestionText};
