//! In-memory adapters for polls.

mod repository;

pub use repository::InMemoryPollRepository;
