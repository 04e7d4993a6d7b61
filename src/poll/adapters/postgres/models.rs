//! Diesel row models for poll persistence.

use super::schema::{choices, questions};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for question records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QuestionRow {
    /// Question identifier.
    pub id: uuid::Uuid,
    /// Prompt text.
    pub question_text: String,
    /// Publish timestamp.
    pub pub_date: DateTime<Utc>,
}

/// Insert model for question records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = questions)]
pub struct NewQuestionRow {
    /// Question identifier.
    pub id: uuid::Uuid,
    /// Prompt text.
    pub question_text: String,
    /// Publish timestamp.
    pub pub_date: DateTime<Utc>,
}

/// Query result row for choice records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = choices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChoiceRow {
    /// Choice identifier.
    pub id: uuid::Uuid,
    /// Owning question.
    pub question_id: uuid::Uuid,
    /// Answer label.
    pub choice_text: String,
    /// Vote tally.
    pub votes: i32,
}

/// Insert model for choice records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = choices)]
pub struct NewChoiceRow {
    /// Choice identifier.
    pub id: uuid::Uuid,
    /// Owning question.
    pub question_id: uuid::Uuid,
    /// Answer label.
    pub choice_text: String,
    /// Vote tally.
    pub votes: i32,
}
