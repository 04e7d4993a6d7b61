//! Shared world state for poll BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use polls::poll::{
    adapters::memory::InMemoryPollRepository,
    domain::{Choice, Question},
    services::{FixedClock, PollService, PollServiceError, VoteResult},
    views::{PollViews, ViewOutcome},
};
use rstest::fixture;

/// View handlers used by the BDD world.
pub type TestPollViews = PollViews<InMemoryPollRepository, FixedClock>;

/// Scenario world for poll behaviour tests.
pub struct PollWorld {
    pub now: DateTime<Utc>,
    pub repository: Arc<InMemoryPollRepository>,
    pub views: TestPollViews,
    pub questions: HashMap<String, Question>,
    pub last_outcome: Option<ViewOutcome>,
    pub last_listing: Option<Vec<Question>>,
    pub last_vote: Option<Result<VoteResult, PollServiceError>>,
}

impl PollWorld {
    /// Creates a world over an empty store with a pinned clock.
    ///
    /// # Panics
    ///
    /// Panics if the built-in templates fail to compile.
    #[must_use]
    #[expect(
        clippy::expect_used,
        reason = "Scenario setup fails loudly on fixture errors"
    )]
    pub fn new() -> Self {
        let now = Utc
            .with_ymd_and_hms(2026, 6, 1, 12, 0, 0)
            .single()
            .expect("valid fixed instant");
        let repository = Arc::new(InMemoryPollRepository::new());
        let service = PollService::new(Arc::clone(&repository), Arc::new(FixedClock::new(now)));
        let views = PollViews::new(service).expect("templates should compile");

        Self {
            now,
            repository,
            views,
            questions: HashMap::new(),
            last_outcome: None,
            last_listing: None,
            last_vote: None,
        }
    }

    /// Returns a question created earlier in the scenario.
    pub fn question(&self, text: &str) -> Result<&Question, eyre::Report> {
        self.questions
            .get(text)
            .ok_or_else(|| eyre::eyre!("no question {text:?} in scenario world"))
    }

    /// Returns a choice of a question created earlier in the scenario.
    pub fn choice(&self, question: &str, choice: &str) -> Result<&Choice, eyre::Report> {
        self.question(question)?
            .choices()
            .iter()
            .find(|candidate| candidate.text().as_str() == choice)
            .ok_or_else(|| eyre::eyre!("no choice {choice:?} on question {question:?}"))
    }
}

impl Default for PollWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PollWorld {
    PollWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
