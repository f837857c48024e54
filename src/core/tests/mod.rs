//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Restriction policy tests
//! - Candidate-key validation tests
//! - Key-usage index tests
//! - Mapping config parser tests

#[cfg(test)]
mod parser_tests;
#[cfg(test)]
mod restriction_tests;
#[cfg(test)]
mod validator_tests;
