//! Selection rules for the latest-questions listing.

use super::Question;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Number of questions shown on the listing page.
pub const LATEST_QUESTIONS_LIMIT: usize = 5;

/// Query for the most recently published questions that can be voted on.
///
/// A question qualifies when it is published at or before `now` and has at
/// least one choice. Results are ordered newest first and truncated to
/// `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestQuestionsQuery {
    now: DateTime<Utc>,
    limit: usize,
}

impl LatestQuestionsQuery {
    /// Creates a query evaluated at `now` with the default listing limit.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            limit: LATEST_QUESTIONS_LIMIT,
        }
    }

    /// Overrides the number of questions returned.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Returns the instant the query is evaluated at.
    #[must_use]
    pub const fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Returns the maximum number of questions returned.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Returns whether `question` passes the listing filter.
    #[must_use]
    pub fn admits(&self, question: &Question) -> bool {
        question.is_published(self.now) && question.has_choices()
    }

    /// Listing order: newest publish timestamp first, then identifier
    /// descending so equal timestamps sort deterministically.
    #[must_use]
    pub fn order(left: &Question, right: &Question) -> Ordering {
        right
            .pub_date()
            .cmp(&left.pub_date())
            .then_with(|| right.id().cmp(&left.id()))
    }

    /// Applies filter, order and limit to an arbitrary set of questions.
    #[must_use]
    pub fn apply<'a>(&self, questions: impl IntoIterator<Item = &'a Question>) -> Vec<Question> {
        let mut selected: Vec<Question> = questions
            .into_iter()
            .filter(|question| self.admits(question))
            .cloned()
            .collect();
        selected.sort_by(Self::order);
        selected.truncate(self.limit);
        selected
    }
}
