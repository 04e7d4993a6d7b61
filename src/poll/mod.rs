//! Poll listing, lookup and voting.
//!
//! A question is listed once it is published and has at least one choice;
//! its detail and results pages are visible once it is published; votes are
//! counted one at a time with an atomic increment. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - View handlers and rendering in [`views`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod views;

#[cfg(test)]
mod tests;
