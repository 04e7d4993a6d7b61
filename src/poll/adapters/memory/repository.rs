//! In-memory repository for poll tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::poll::{
    domain::{Choice, ChoiceId, LatestQuestionsQuery, Question, QuestionId},
    ports::{PollRepository, PollRepositoryError, PollRepositoryResult},
};

/// Thread-safe in-memory poll repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPollRepository {
    state: Arc<RwLock<InMemoryPollState>>,
}

#[derive(Debug, Default)]
struct InMemoryPollState {
    questions: HashMap<QuestionId, Question>,
    choice_index: HashMap<ChoiceId, QuestionId>,
}

impl InMemoryPollRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> PollRepositoryResult<RwLockReadGuard<'_, InMemoryPollState>> {
        self.state.read().map_err(|err| {
            PollRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> PollRepositoryResult<RwLockWriteGuard<'_, InMemoryPollState>> {
        self.state.write().map_err(|err| {
            PollRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl PollRepository for InMemoryPollRepository {
    async fn store_question(&self, question: &Question) -> PollRepositoryResult<()> {
        let mut state = self.write()?;
        if state.questions.contains_key(&question.id()) {
            return Err(PollRepositoryError::DuplicateQuestion(question.id()));
        }
        if let Some(duplicate) = question
            .choices()
            .iter()
            .find(|choice| state.choice_index.contains_key(&choice.id()))
        {
            return Err(PollRepositoryError::DuplicateChoice(duplicate.id()));
        }

        for choice in question.choices() {
            state.choice_index.insert(choice.id(), question.id());
        }
        state.questions.insert(question.id(), question.clone());
        Ok(())
    }

    async fn add_choice(&self, choice: &Choice) -> PollRepositoryResult<()> {
        let mut state = self.write()?;
        if state.choice_index.contains_key(&choice.id()) {
            return Err(PollRepositoryError::DuplicateChoice(choice.id()));
        }
        let question = state
            .questions
            .get_mut(&choice.question_id())
            .ok_or(PollRepositoryError::QuestionNotFound(choice.question_id()))?;
        question.push_choice(choice.clone());
        state.choice_index.insert(choice.id(), choice.question_id());
        Ok(())
    }

    async fn find_question(&self, id: QuestionId) -> PollRepositoryResult<Option<Question>> {
        let state = self.read()?;
        Ok(state.questions.get(&id).cloned())
    }

    async fn latest_published(
        &self,
        query: LatestQuestionsQuery,
    ) -> PollRepositoryResult<Vec<Question>> {
        let state = self.read()?;
        Ok(query.apply(state.questions.values()))
    }

    async fn increment_votes(
        &self,
        question_id: QuestionId,
        choice_id: ChoiceId,
    ) -> PollRepositoryResult<Option<Choice>> {
        // The write lock spans read, increment and write-back, so concurrent
        // votes never lose an update.
        let mut state = self.write()?;
        let Some(question) = state.questions.get_mut(&question_id) else {
            return Ok(None);
        };
        let Some(mut choice) = question.choice(choice_id).cloned() else {
            return Ok(None);
        };
        choice
            .record_vote()
            .map_err(|_| PollRepositoryError::VoteCountOverflow(choice_id))?;
        question.replace_choice(choice.clone());
        Ok(Some(choice))
    }
}
