//! Adapter implementations of the poll ports.

pub mod memory;
pub mod postgres;
