//! Repository port for question and choice persistence.

use crate::poll::domain::{Choice, ChoiceId, LatestQuestionsQuery, Question, QuestionId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for poll repository operations.
pub type PollRepositoryResult<T> = Result<T, PollRepositoryError>;

/// Question and choice persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PollRepository: Send + Sync {
    /// Stores a new question together with any choices it already owns.
    ///
    /// # Errors
    ///
    /// Returns [`PollRepositoryError::DuplicateQuestion`] when the question ID
    /// already exists or [`PollRepositoryError::DuplicateChoice`] when one of
    /// its choices does.
    async fn store_question(&self, question: &Question) -> PollRepositoryResult<()>;

    /// Stores a new choice for an existing question.
    ///
    /// # Errors
    ///
    /// Returns [`PollRepositoryError::QuestionNotFound`] when the owning
    /// question does not exist or [`PollRepositoryError::DuplicateChoice`]
    /// when the choice ID already exists.
    async fn add_choice(&self, choice: &Choice) -> PollRepositoryResult<()>;

    /// Finds a question, with its choices, by identifier.
    ///
    /// Returns `None` when the question does not exist.
    async fn find_question(&self, id: QuestionId) -> PollRepositoryResult<Option<Question>>;

    /// Returns the questions selected by `query`, newest first.
    async fn latest_published(
        &self,
        query: LatestQuestionsQuery,
    ) -> PollRepositoryResult<Vec<Question>>;

    /// Atomically adds one vote to a choice of the given question.
    ///
    /// Returns the updated choice, or `None` when no choice with that
    /// identifier belongs to the question.
    ///
    /// # Errors
    ///
    /// Returns [`PollRepositoryError::VoteCountOverflow`] when the tally is
    /// already at [`MAX_VOTES`](crate::poll::domain::MAX_VOTES).
    async fn increment_votes(
        &self,
        question_id: QuestionId,
        choice_id: ChoiceId,
    ) -> PollRepositoryResult<Option<Choice>>;
}

/// Errors returned by poll repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PollRepositoryError {
    /// A question with the same identifier already exists.
    #[error("duplicate question identifier: {0}")]
    DuplicateQuestion(QuestionId),

    /// A choice with the same identifier already exists.
    #[error("duplicate choice identifier: {0}")]
    DuplicateChoice(ChoiceId),

    /// The question was not found.
    #[error("question not found: {0}")]
    QuestionNotFound(QuestionId),

    /// The choice already holds the maximum vote tally.
    #[error("vote count overflow for choice {0}")]
    VoteCountOverflow(ChoiceId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PollRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
