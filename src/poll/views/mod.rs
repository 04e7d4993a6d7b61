//! View handlers, named routes and page rendering.
//!
//! Handlers are plain async methods returning a [`ViewOutcome`]. Mapping an
//! outcome onto a transport (HTTP, CLI) is left to the caller.

mod handlers;
mod routes;
mod templates;

pub use handlers::{PollViews, ViewError, ViewOutcome, ViewResult, VoteForm};
pub use routes::{ROUTE_NAMESPACE, Route};
pub use templates::{
    ChoiceView, DETAIL_TEMPLATE, INDEX_TEMPLATE, PollTemplates, QuestionView, RESULTS_TEMPLATE,
};
