//! Choice entity owned by a question.

use super::{ChoiceId, ChoiceText, PollDomainError, QuestionId};
use serde::{Deserialize, Serialize};

/// Highest vote tally a choice can hold.
///
/// Matches the `INTEGER` column used by the `PostgreSQL` adapter, so both
/// adapters reject the same increment.
pub const MAX_VOTES: u32 = i32::MAX.unsigned_abs();

/// One selectable answer to a question, with its vote tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    id: ChoiceId,
    question_id: QuestionId,
    text: ChoiceText,
    votes: u32,
}

impl Choice {
    /// Creates a choice with no votes.
    #[must_use]
    pub fn new(question_id: QuestionId, text: ChoiceText) -> Self {
        Self {
            id: ChoiceId::new(),
            question_id,
            text,
            votes: 0,
        }
    }

    /// Reconstructs a choice from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: ChoiceId,
        question_id: QuestionId,
        text: ChoiceText,
        votes: u32,
    ) -> Self {
        Self {
            id,
            question_id,
            text,
            votes,
        }
    }

    /// Returns the choice identifier.
    #[must_use]
    pub const fn id(&self) -> ChoiceId {
        self.id
    }

    /// Returns the owning question identifier.
    #[must_use]
    pub const fn question_id(&self) -> QuestionId {
        self.question_id
    }

    /// Returns the choice text.
    #[must_use]
    pub const fn text(&self) -> &ChoiceText {
        &self.text
    }

    /// Returns the number of votes recorded.
    #[must_use]
    pub const fn votes(&self) -> u32 {
        self.votes
    }

    /// Adds exactly one vote.
    ///
    /// # Errors
    ///
    /// Returns [`PollDomainError::VoteCountOverflow`] when the tally is
    /// already at [`MAX_VOTES`].
    pub fn record_vote(&mut self) -> Result<(), PollDomainError> {
        self.votes = self
            .votes
            .checked_add(1)
            .filter(|votes| *votes <= MAX_VOTES)
            .ok_or_else(|| PollDomainError::VoteCountOverflow(self.id.to_string()))?;
        Ok(())
    }
}
