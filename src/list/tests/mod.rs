//! Unit and service tests for the list catalogue.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

mod service_tests;
