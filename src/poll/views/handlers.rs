//! Request handlers for the four poll views.

use super::{PollTemplates, Route};
use crate::poll::{
    domain::QuestionId,
    ports::PollRepository,
    services::{PollService, PollServiceError, VoteResult},
};
use mockable::Clock;
use serde::Deserialize;
use thiserror::Error;

/// Typed response of a view handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutcome {
    /// A rendered page.
    Found(String),
    /// The voting form redisplayed with an error message.
    FormError(String),
    /// The requested question is absent or not yet published.
    NotFound,
    /// Navigate to another view.
    Redirect(Route),
}

impl ViewOutcome {
    /// Returns the HTTP status code a transport should answer with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Found(_) | Self::FormError(_) => 200,
            Self::NotFound => 404,
            Self::Redirect(_) => 302,
        }
    }

    /// Returns the rendered body, if the outcome carries one.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Found(body) | Self::FormError(body) => Some(body),
            Self::NotFound | Self::Redirect(_) => None,
        }
    }
}

/// Submitted voting form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VoteForm {
    /// Raw identifier of the selected choice, absent when nothing was
    /// selected.
    pub choice: Option<String>,
}

impl VoteForm {
    /// Creates a form selecting the given choice.
    #[must_use]
    pub fn with_choice(choice: impl Into<String>) -> Self {
        Self {
            choice: Some(choice.into()),
        }
    }
}

/// Errors a view cannot turn into a [`ViewOutcome`].
#[derive(Debug, Error)]
pub enum ViewError {
    /// The service failed for a reason other than a missing question.
    #[error(transparent)]
    Service(PollServiceError),
    /// A template failed to render.
    #[error("template rendering failed: {0}")]
    Render(#[from] minijinja::Error),
}

/// Result type for view handlers.
pub type ViewResult = Result<ViewOutcome, ViewError>;

/// Poll view handlers bound to a service and compiled templates.
pub struct PollViews<R, C>
where
    R: PollRepository,
    C: Clock + Send + Sync,
{
    service: PollService<R, C>,
    templates: PollTemplates,
}

impl<R, C> PollViews<R, C>
where
    R: PollRepository,
    C: Clock + Send + Sync,
{
    /// Creates view handlers over `service`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Render`] when the built-in templates fail to
    /// compile.
    pub fn new(service: PollService<R, C>) -> Result<Self, ViewError> {
        Ok(Self {
            service,
            templates: PollTemplates::new()?,
        })
    }

    /// Returns the underlying service.
    #[must_use]
    pub const fn service(&self) -> &PollService<R, C> {
        &self.service
    }

    /// Lists the latest published questions.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] when the query or rendering fails.
    pub async fn index(&self) -> ViewResult {
        let questions = self
            .service
            .list_recent_questions()
            .await
            .map_err(ViewError::Service)?;
        Ok(ViewOutcome::Found(self.templates.render_index(&questions)?))
    }

    /// Shows the voting form of a published question.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] when the lookup or rendering fails.
    pub async fn detail(&self, question_id: QuestionId) -> ViewResult {
        match self.service.get_published_question(question_id).await {
            Ok(question) => Ok(ViewOutcome::Found(
                self.templates.render_detail(&question, None)?,
            )),
            Err(err) => not_found_or(err),
        }
    }

    /// Shows the vote tallies of a published question.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] when the lookup or rendering fails.
    pub async fn results(&self, question_id: QuestionId) -> ViewResult {
        match self.service.get_published_question(question_id).await {
            Ok(question) => Ok(ViewOutcome::Found(
                self.templates.render_results(&question)?,
            )),
            Err(err) => not_found_or(err),
        }
    }

    /// Records a vote and redirects to the results, or redisplays the form.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] when persistence or rendering fails.
    pub async fn vote(&self, question_id: QuestionId, form: &VoteForm) -> ViewResult {
        match self
            .service
            .record_vote(question_id, form.choice.as_deref())
            .await
        {
            Ok(VoteResult::Redirect(id)) => Ok(ViewOutcome::Redirect(Route::Results(id))),
            Ok(VoteResult::FormError { question, message }) => Ok(ViewOutcome::FormError(
                self.templates.render_detail(&question, Some(&message))?,
            )),
            Err(err) => not_found_or(err),
        }
    }
}

fn not_found_or(err: PollServiceError) -> ViewResult {
    match err {
        PollServiceError::NotFound(_) => Ok(ViewOutcome::NotFound),
        other => Err(ViewError::Service(other)),
    }
}
