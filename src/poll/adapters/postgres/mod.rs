//! `PostgreSQL` adapters for poll persistence.

pub mod models;
mod repository;
mod schema;

#[cfg(test)]
pub(crate) use repository::{row_to_choice, row_to_question};
pub use repository::{PollPgPool, PostgresPollRepository, SCHEMA_SQL};
