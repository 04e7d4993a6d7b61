//! Unit tests for the poll module.
