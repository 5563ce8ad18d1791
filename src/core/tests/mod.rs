//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Combo normalisation tests (string path and event path)
//! - Registry lifecycle tests
//! - Dispatch protocol tests

#[cfg(test)]
mod parser_tests;
