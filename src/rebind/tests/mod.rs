//! Rebind module tests
//!
//! Contains test suites for the rebind protocol:
//! - Input box seeding and slot lifecycle tests
//! - Container validation, collision and swap protocol tests
