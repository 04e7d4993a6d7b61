//! Port contracts for polls.
//!
//! Ports define infrastructure-agnostic interfaces used by poll services.

pub mod repository;

#[cfg(test)]
pub use repository::MockPollRepository;
pub use repository::{PollRepository, PollRepositoryError, PollRepositoryResult};
