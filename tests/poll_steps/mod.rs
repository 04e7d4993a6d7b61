//! Step definitions for poll behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
