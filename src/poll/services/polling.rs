//! Service layer for listing, lookup, voting and poll administration.

use crate::poll::{
    domain::{
        Choice, ChoiceId, ChoiceText, LatestQuestionsQuery, PollDomainError, Question, QuestionId,
        QuestionText,
    },
    ports::{PollRepository, PollRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Message shown when a vote submission does not name one of the question's
/// choices.
pub const NO_CHOICE_SELECTED: &str = "You didn't select a choice";

/// Request payload for creating a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateQuestionRequest {
    text: String,
    pub_date: DateTime<Utc>,
    choices: Vec<String>,
}

impl CreateQuestionRequest {
    /// Creates a request for a question published at `pub_date`.
    #[must_use]
    pub fn new(text: impl Into<String>, pub_date: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            pub_date,
            choices: Vec::new(),
        }
    }

    /// Adds one choice.
    #[must_use]
    pub fn with_choice(mut self, text: impl Into<String>) -> Self {
        self.choices.push(text.into());
        self
    }

    /// Sets all choices, replacing any added earlier.
    #[must_use]
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = String>) -> Self {
        self.choices = choices.into_iter().collect();
        self
    }
}

/// Outcome of a vote submission that found its question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteResult {
    /// The vote was counted; the caller should show the results of this
    /// question.
    Redirect(QuestionId),
    /// The submission did not name a valid choice; nothing was counted.
    FormError {
        /// Current state of the question, for redisplaying the form.
        question: Question,
        /// Human-readable reason.
        message: String,
    },
}

/// Service-level errors for poll operations.
#[derive(Debug, Error)]
pub enum PollServiceError {
    /// The question does not exist or is not visible yet.
    #[error("question not found: {0}")]
    NotFound(QuestionId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PollDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] PollRepositoryError),
}

/// Result type for poll service operations.
pub type PollServiceResult<T> = Result<T, PollServiceError>;

/// Poll orchestration service.
///
/// Every operation reads the clock once and passes that instant to the
/// domain rules and repository queries.
#[derive(Clone)]
pub struct PollService<R, C>
where
    R: PollRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> PollService<R, C>
where
    R: PollRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new poll service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the current instant according to the service clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Creates and stores a question with its initial choices.
    ///
    /// # Errors
    ///
    /// Returns [`PollServiceError::Domain`] when the question or any choice
    /// text is invalid, or [`PollServiceError::Repository`] when persistence
    /// fails.
    pub async fn create_question(
        &self,
        request: CreateQuestionRequest,
    ) -> PollServiceResult<Question> {
        let text = QuestionText::new(request.text)?;
        let choice_texts = request
            .choices
            .into_iter()
            .map(ChoiceText::new)
            .collect::<Result<Vec<_>, _>>()?;

        let mut question = Question::new(text, request.pub_date);
        for choice_text in choice_texts {
            question.add_choice(choice_text);
        }
        self.repository.store_question(&question).await?;
        info!(
            question_id = %question.id(),
            choices = question.choices().len(),
            "question created"
        );
        Ok(question)
    }

    /// Adds a choice with no votes to an existing question.
    ///
    /// # Errors
    ///
    /// Returns [`PollServiceError::NotFound`] when the question does not
    /// exist, [`PollServiceError::Domain`] when the text is invalid, or
    /// [`PollServiceError::Repository`] when persistence fails.
    pub async fn add_choice(
        &self,
        question_id: QuestionId,
        text: impl Into<String>,
    ) -> PollServiceResult<Choice> {
        let choice = Choice::new(question_id, ChoiceText::new(text)?);
        match self.repository.add_choice(&choice).await {
            Ok(()) => {
                info!(%question_id, choice_id = %choice.id(), "choice added");
                Ok(choice)
            }
            Err(PollRepositoryError::QuestionNotFound(id)) => Err(PollServiceError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns up to five published questions that have choices, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`PollServiceError::Repository`] when the query fails.
    pub async fn list_recent_questions(&self) -> PollServiceResult<Vec<Question>> {
        let query = LatestQuestionsQuery::new(self.now());
        Ok(self.repository.latest_published(query).await?)
    }

    /// Returns a question that is published at the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`PollServiceError::NotFound`] when the question does not
    /// exist or its publish timestamp is in the future, or
    /// [`PollServiceError::Repository`] when the lookup fails.
    pub async fn get_published_question(&self, id: QuestionId) -> PollServiceResult<Question> {
        let now = self.now();
        match self.repository.find_question(id).await? {
            Some(question) if question.is_published(now) => Ok(question),
            Some(_) => {
                debug!(question_id = %id, "question not published yet");
                Err(PollServiceError::NotFound(id))
            }
            None => {
                debug!(question_id = %id, "question does not exist");
                Err(PollServiceError::NotFound(id))
            }
        }
    }

    /// Counts one vote for the submitted choice of a question.
    ///
    /// `submitted_choice` is the raw form value; `None` means the form had
    /// no choice field. Any value that does not name one of the question's
    /// own choices yields [`VoteResult::FormError`] and changes nothing.
    ///
    /// Not idempotent: each successful call adds one vote.
    ///
    /// # Errors
    ///
    /// Returns [`PollServiceError::NotFound`] when the question does not
    /// exist, or [`PollServiceError::Repository`] when persistence fails.
    pub async fn record_vote(
        &self,
        question_id: QuestionId,
        submitted_choice: Option<&str>,
    ) -> PollServiceResult<VoteResult> {
        let question = self
            .repository
            .find_question(question_id)
            .await?
            .ok_or(PollServiceError::NotFound(question_id))?;

        let Some(choice_id) = selected_choice(&question, submitted_choice) else {
            debug!(%question_id, ?submitted_choice, "vote rejected");
            return Ok(form_error(question));
        };

        match self
            .repository
            .increment_votes(question_id, choice_id)
            .await?
        {
            Some(choice) => {
                info!(%question_id, %choice_id, votes = choice.votes(), "vote recorded");
                Ok(VoteResult::Redirect(question_id))
            }
            None => {
                debug!(%question_id, %choice_id, "choice vanished before the vote was counted");
                let reloaded = self
                    .repository
                    .find_question(question_id)
                    .await?
                    .ok_or(PollServiceError::NotFound(question_id))?;
                Ok(form_error(reloaded))
            }
        }
    }
}

fn selected_choice(question: &Question, submitted: Option<&str>) -> Option<ChoiceId> {
    let choice_id = submitted?.parse::<ChoiceId>().ok()?;
    question.choice(choice_id).map(Choice::id)
}

fn form_error(question: Question) -> VoteResult {
    VoteResult::FormError {
        question,
        message: NO_CHOICE_SELECTED.to_owned(),
    }
}
