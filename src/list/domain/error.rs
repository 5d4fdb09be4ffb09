//! Error types for list domain validation.

use thiserror::Error;

/// Errors returned while constructing domain list values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListDomainError {
    /// The list title is empty after trimming.
    #[error("list title must not be empty")]
    EmptyTitle,

    /// The list title exceeds the 100 character limit.
    #[error("list title of {0} characters exceeds the 100 character limit")]
    TitleTooLong(usize),
}
