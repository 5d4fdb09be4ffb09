//! Repository port for list persistence and catalogue lookup.

use crate::list::domain::{List, ListId, ListQuery, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for list repository operations.
pub type ListRepositoryResult<T> = Result<T, ListRepositoryError>;

/// List persistence contract. Every operation is scoped to an owner.
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Stores a new list.
    ///
    /// # Errors
    ///
    /// Returns [`ListRepositoryError::DuplicateTitle`] when the owner already
    /// has a list with the same title, or
    /// [`ListRepositoryError::DuplicateList`] when the list ID already exists.
    async fn insert(&self, list: &List) -> ListRepositoryResult<()>;

    /// Persists changes to an existing list (title, favourited flag,
    /// timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`ListRepositoryError::NotFound`] when no list with the given
    /// ID exists for the owner.
    async fn update(&self, list: &List) -> ListRepositoryResult<()>;

    /// Finds a list by identifier, scoped to the owner.
    ///
    /// Returns `None` when the list does not exist or belongs to another
    /// user.
    async fn find_by_id(&self, id: ListId, owner: UserId) -> ListRepositoryResult<Option<List>>;

    /// Returns whether a list with the given identifier exists for the owner.
    async fn exists(&self, id: ListId, owner: UserId) -> ListRepositoryResult<bool>;

    /// Returns the owner's lists matching the query, filtered, sorted, and
    /// paginated.
    async fn query(&self, owner: UserId, query: &ListQuery) -> ListRepositoryResult<Vec<List>>;

    /// Removes a list, returning whether a record was deleted.
    async fn delete(&self, id: ListId, owner: UserId) -> ListRepositoryResult<bool>;

    /// Removes every list belonging to the owner, returning the removed
    /// identifiers so callers can cascade dependent records.
    async fn delete_all_for_user(&self, owner: UserId) -> ListRepositoryResult<Vec<ListId>>;
}

/// Errors returned by list repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ListRepositoryError {
    /// A list with the same identifier already exists.
    #[error("duplicate list identifier: {0}")]
    DuplicateList(ListId),

    /// The owner already has a list with this title.
    #[error("duplicate list title: {0}")]
    DuplicateTitle(String),

    /// The list was not found for the owner.
    #[error("list not found: {0}")]
    NotFound(ListId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ListRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
