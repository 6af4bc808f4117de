//! Helpers that interpret CI-provided configuration for test suites.

pub mod property_test_profile;
