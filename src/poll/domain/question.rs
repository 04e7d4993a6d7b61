//! Question aggregate root.

use super::{
    Choice, ChoiceId, ChoiceText, QuestionId, QuestionText, is_published, is_recently_published,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Poll prompt with a publish timestamp and the choices it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: QuestionText,
    pub_date: DateTime<Utc>,
    choices: Vec<Choice>,
}

/// Parameter object for reconstructing a persisted question aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedQuestionData {
    /// Persisted question identifier.
    pub id: QuestionId,
    /// Persisted prompt.
    pub text: QuestionText,
    /// Persisted publish timestamp.
    pub pub_date: DateTime<Utc>,
    /// Persisted choices in creation order.
    pub choices: Vec<Choice>,
}

impl Question {
    /// Creates a question with no choices.
    #[must_use]
    pub fn new(text: QuestionText, pub_date: DateTime<Utc>) -> Self {
        Self {
            id: QuestionId::new(),
            text,
            pub_date,
            choices: Vec::new(),
        }
    }

    /// Reconstructs a question from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedQuestionData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            pub_date: data.pub_date,
            choices: data.choices,
        }
    }

    /// Returns the question identifier.
    #[must_use]
    pub const fn id(&self) -> QuestionId {
        self.id
    }

    /// Returns the question text.
    #[must_use]
    pub const fn text(&self) -> &QuestionText {
        &self.text
    }

    /// Returns the publish timestamp.
    #[must_use]
    pub const fn pub_date(&self) -> DateTime<Utc> {
        self.pub_date
    }

    /// Returns the choices in creation order.
    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Returns the choice with the given identifier, if it belongs to this
    /// question.
    #[must_use]
    pub fn choice(&self, id: ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.id() == id)
    }

    /// Returns whether the question has at least one choice.
    #[must_use]
    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }

    /// Returns the sum of votes across all choices.
    #[must_use]
    pub fn total_votes(&self) -> u64 {
        self.choices
            .iter()
            .map(|choice| u64::from(choice.votes()))
            .sum()
    }

    /// Returns whether the question is visible at `now`.
    #[must_use]
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        is_published(self.pub_date, now)
    }

    /// Returns whether the question was published within the last day.
    #[must_use]
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        is_recently_published(self.pub_date, now)
    }

    /// Appends a new choice with no votes and returns a copy of it.
    pub fn add_choice(&mut self, text: ChoiceText) -> Choice {
        let choice = Choice::new(self.id, text);
        self.choices.push(choice.clone());
        choice
    }

    /// Appends an already constructed choice belonging to this question.
    pub(crate) fn push_choice(&mut self, choice: Choice) {
        self.choices.push(choice);
    }

    /// Replaces a stored choice with an updated copy.
    pub(crate) fn replace_choice(&mut self, updated: Choice) {
        if let Some(slot) = self
            .choices
            .iter_mut()
            .find(|choice| choice.id() == updated.id())
        {
            *slot = updated;
        }
    }
}
