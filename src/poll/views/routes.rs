//! Named routes for the poll views.

use crate::poll::domain::QuestionId;
use std::fmt;

/// Route namespace shared by all poll views.
pub const ROUTE_NAMESPACE: &str = "polls";

/// A poll view together with the arguments needed to reverse it to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Latest questions listing.
    Index,
    /// Voting form for a question.
    Detail(QuestionId),
    /// Vote tallies for a question.
    Results(QuestionId),
    /// Vote submission target for a question.
    Vote(QuestionId),
}

impl Route {
    /// Returns the namespaced route name, such as `polls:results`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Index => "polls:index",
            Self::Detail(_) => "polls:detail",
            Self::Results(_) => "polls:results",
            Self::Vote(_) => "polls:vote",
        }
    }

    /// Returns the question the route refers to, if any.
    #[must_use]
    pub const fn question_id(self) -> Option<QuestionId> {
        match self {
            Self::Index => None,
            Self::Detail(id) | Self::Results(id) | Self::Vote(id) => Some(id),
        }
    }

    /// Reverses the route to its URL path.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Index => format!("/{ROUTE_NAMESPACE}/"),
            Self::Detail(id) => format!("/{ROUTE_NAMESPACE}/{id}/"),
            Self::Results(id) => format!("/{ROUTE_NAMESPACE}/{id}/results/"),
            Self::Vote(id) => format!("/{ROUTE_NAMESPACE}/{id}/vote/"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
