//! `PostgreSQL` repository implementation for poll storage.

use super::{
    models::{ChoiceRow, NewChoiceRow, NewQuestionRow, QuestionRow},
    schema::{choices, questions},
};
use crate::poll::{
    domain::{
        Choice, ChoiceId, ChoiceText, LatestQuestionsQuery, MAX_VOTES, PersistedQuestionData,
        Question, QuestionId, QuestionText,
    },
    ports::{PollRepository, PollRepositoryError, PollRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;
use uuid::Uuid;

/// [`MAX_VOTES`] as stored in the `INTEGER` votes column.
const MAX_VOTES_SQL: i32 = i32::MAX;

const _: () = assert!(MAX_VOTES_SQL.unsigned_abs() == MAX_VOTES);

/// `PostgreSQL` connection pool type used by poll adapters.
pub type PollPgPool = Pool<ConnectionManager<PgConnection>>;

/// SQL creating the poll tables. Safe to run repeatedly.
pub const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_polls/up.sql");

/// `PostgreSQL`-backed poll repository.
#[derive(Debug, Clone)]
pub struct PostgresPollRepository {
    pool: PollPgPool,
}

impl PostgresPollRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PollPgPool) -> Self {
        Self { pool }
    }

    /// Creates the poll tables if they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`PollRepositoryError::Persistence`] when the connection or
    /// the DDL fails.
    pub async fn apply_schema(&self) -> PollRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(SCHEMA_SQL)
                .map_err(PollRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> PollRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PollRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(PollRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PollRepositoryError::persistence)?
    }
}

impl From<DieselError> for PollRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl PollRepository for PostgresPollRepository {
    async fn store_question(&self, question: &Question) -> PollRepositoryResult<()> {
        let question_id = question.id();
        let question_row = to_new_question_row(question);
        let choice_rows = question
            .choices()
            .iter()
            .map(to_new_choice_row)
            .collect::<PollRepositoryResult<Vec<_>>>()?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, PollRepositoryError, _>(|tx| {
                diesel::insert_into(questions::table)
                    .values(&question_row)
                    .execute(tx)
                    .map_err(|err| {
                        unique_violation_or(err, PollRepositoryError::DuplicateQuestion(question_id))
                    })?;
                for row in &choice_rows {
                    insert_choice(tx, row)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn add_choice(&self, choice: &Choice) -> PollRepositoryResult<()> {
        let row = to_new_choice_row(choice)?;
        self.run_blocking(move |connection| insert_choice(connection, &row))
            .await
    }

    async fn find_question(&self, id: QuestionId) -> PollRepositoryResult<Option<Question>> {
        self.run_blocking(move |connection| {
            let row = questions::table
                .find(id.into_inner())
                .select(QuestionRow::as_select())
                .first::<QuestionRow>(connection)
                .optional()
                .map_err(PollRepositoryError::persistence)?;
            let Some(question_row) = row else {
                return Ok(None);
            };
            let choice_rows = load_choices(connection, vec![question_row.id])?;
            row_to_question(question_row, choice_rows).map(Some)
        })
        .await
    }

    async fn latest_published(
        &self,
        query: LatestQuestionsQuery,
    ) -> PollRepositoryResult<Vec<Question>> {
        let limit = i64::try_from(query.limit()).map_err(PollRepositoryError::persistence)?;
        let now = query.now();
        self.run_blocking(move |connection| {
            let question_rows = questions::table
                .filter(questions::pub_date.le(now))
                .filter(questions::id.eq_any(choices::table.select(choices::question_id)))
                .order((questions::pub_date.desc(), questions::id.desc()))
                .limit(limit)
                .select(QuestionRow::as_select())
                .load::<QuestionRow>(connection)
                .map_err(PollRepositoryError::persistence)?;

            let ids = question_rows.iter().map(|row| row.id).collect();
            let mut grouped: HashMap<Uuid, Vec<ChoiceRow>> = HashMap::new();
            for choice_row in load_choices(connection, ids)? {
                grouped
                    .entry(choice_row.question_id)
                    .or_default()
                    .push(choice_row);
            }

            question_rows
                .into_iter()
                .map(|row| {
                    let owned = grouped.remove(&row.id).unwrap_or_default();
                    row_to_question(row, owned)
                })
                .collect()
        })
        .await
    }

    async fn increment_votes(
        &self,
        question_id: QuestionId,
        choice_id: ChoiceId,
    ) -> PollRepositoryResult<Option<Choice>> {
        self.run_blocking(move |connection| {
            let owned = choices::table
                .filter(choices::id.eq(choice_id.into_inner()))
                .filter(choices::question_id.eq(question_id.into_inner()));
            let row = diesel::update(owned.clone().filter(choices::votes.lt(MAX_VOTES_SQL)))
                .set(choices::votes.eq(choices::votes + 1))
                .returning(ChoiceRow::as_returning())
                .get_result::<ChoiceRow>(connection)
                .optional()
                .map_err(PollRepositoryError::persistence)?;
            if let Some(updated) = row {
                return row_to_choice(updated).map(Some);
            }

            // No row updated: either the choice is foreign or its tally is full.
            let exists = diesel::select(diesel::dsl::exists(owned))
                .get_result::<bool>(connection)
                .map_err(PollRepositoryError::persistence)?;
            if exists {
                Err(PollRepositoryError::VoteCountOverflow(choice_id))
            } else {
                Ok(None)
            }
        })
        .await
    }
}

fn to_new_question_row(question: &Question) -> NewQuestionRow {
    NewQuestionRow {
        id: question.id().into_inner(),
        question_text: question.text().as_str().to_owned(),
        pub_date: question.pub_date(),
    }
}

fn to_new_choice_row(choice: &Choice) -> PollRepositoryResult<NewChoiceRow> {
    let votes = i32::try_from(choice.votes()).map_err(PollRepositoryError::persistence)?;
    Ok(NewChoiceRow {
        id: choice.id().into_inner(),
        question_id: choice.question_id().into_inner(),
        choice_text: choice.text().as_str().to_owned(),
        votes,
    })
}

fn insert_choice(connection: &mut PgConnection, row: &NewChoiceRow) -> PollRepositoryResult<()> {
    let choice_id = ChoiceId::from_uuid(row.id);
    let question_id = QuestionId::from_uuid(row.question_id);
    diesel::insert_into(choices::table)
        .values(row)
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                PollRepositoryError::QuestionNotFound(question_id)
            }
            other => unique_violation_or(other, PollRepositoryError::DuplicateChoice(choice_id)),
        })?;
    Ok(())
}

fn unique_violation_or(err: DieselError, duplicate: PollRepositoryError) -> PollRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => duplicate,
        other => PollRepositoryError::persistence(other),
    }
}

fn load_choices(
    connection: &mut PgConnection,
    question_ids: Vec<Uuid>,
) -> PollRepositoryResult<Vec<ChoiceRow>> {
    choices::table
        .filter(choices::question_id.eq_any(question_ids))
        .order(choices::id.asc())
        .select(ChoiceRow::as_select())
        .load::<ChoiceRow>(connection)
        .map_err(PollRepositoryError::persistence)
}

/// Converts a persisted choice row into a domain choice.
///
/// # Errors
///
/// Returns [`PollRepositoryError::Persistence`] when the stored text is not
/// valid choice text or the stored vote count is negative.
pub(crate) fn row_to_choice(row: ChoiceRow) -> PollRepositoryResult<Choice> {
    let ChoiceRow {
        id,
        question_id,
        choice_text,
        votes,
    } = row;
    let text = ChoiceText::new(choice_text).map_err(PollRepositoryError::persistence)?;
    let votes = u32::try_from(votes).map_err(PollRepositoryError::persistence)?;
    Ok(Choice::from_persisted(
        ChoiceId::from_uuid(id),
        QuestionId::from_uuid(question_id),
        text,
        votes,
    ))
}

/// Converts a persisted question row and its choice rows into an aggregate.
///
/// # Errors
///
/// Returns [`PollRepositoryError::Persistence`] when any stored value fails
/// domain validation.
pub(crate) fn row_to_question(
    row: QuestionRow,
    choice_rows: Vec<ChoiceRow>,
) -> PollRepositoryResult<Question> {
    let QuestionRow {
        id,
        question_text,
        pub_date,
    } = row;
    let text = QuestionText::new(question_text).map_err(PollRepositoryError::persistence)?;
    let choices = choice_rows
        .into_iter()
        .map(row_to_choice)
        .collect::<PollRepositoryResult<Vec<_>>>()?;
    Ok(Question::from_persisted(PersistedQuestionData {
        id: QuestionId::from_uuid(id),
        text,
        pub_date,
        choices,
    }))
}
