//! Store module tests
//!
//! Contains test suites for the mapping store:
//! - File store open/read/persist behaviour
//! - Transaction backup and atomic-write behaviour
