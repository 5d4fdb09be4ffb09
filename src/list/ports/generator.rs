//! Generative-AI boundary for prompt-seeded list creation.
//!
//! The generation call itself lives outside this crate; the port only fixes
//! the contract an adapter must honour when asked to turn a natural-language
//! prompt into a list title plus ordered task titles.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Output of a successful generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedList {
    /// Proposed list title.
    pub title: String,
    /// Proposed task titles, in presentation order.
    pub task_titles: Vec<String>,
}

/// Errors returned by list generator implementations.
#[derive(Debug, Clone, Error)]
pub enum ListGeneratorError {
    /// The generator answered but declined the prompt.
    #[error("list generation rejected: {0}")]
    Rejected(String),

    /// Transport or provider failure.
    #[error("list generator unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl ListGeneratorError {
    /// Wraps a transport or provider failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}

/// Contract for turning a prompt into a proposed list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListGenerator: Send + Sync {
    /// Generates a list title and task titles from the prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ListGeneratorError::Rejected`] when the provider declines
    /// the prompt and [`ListGeneratorError::Unavailable`] on transport
    /// failure.
    async fn generate(&self, prompt: &str) -> Result<GeneratedList, ListGeneratorError>;
}
