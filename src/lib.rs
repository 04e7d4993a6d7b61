//! Polls: publish questions, collect votes and show results.
//!
//! This crate provides the logic of a small poll application: listing the
//! latest published questions, showing a question with its choices,
//! recording votes, and rendering results.
//!
//! # Architecture
//!
//! Polls follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`poll`]: Questions, choices, voting and page rendering
//! - [`config`]: Layered configuration for the binary
//! - [`cli`]: Command-line surface for the binary

pub mod cli;
pub mod config;
pub mod poll;
