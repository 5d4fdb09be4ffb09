//! Unit and service tests for the ordered task store.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code indexes into JSON values and checked collections"
)]

mod domain_tests;
