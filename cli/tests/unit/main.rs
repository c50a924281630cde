//! Unit tests for the autodock CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod architecture;
mod detection;
mod property_tests;
