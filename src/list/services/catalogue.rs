//! Service layer for list creation, lookup, and cascade deletion.
//!
//! All three deletion paths (single list, all lists, user purge) cascade
//! task removal explicitly, deleting tasks before their parent lists so a
//! task never outlives its list.

use crate::list::{
    domain::{List, ListDomainError, ListId, ListQuery, ListTitle, UserId},
    ports::{ListGenerator, ListGeneratorError, ListRepository, ListRepositoryError},
};
use crate::task::{
    domain::{Position, Task, TaskDomainError, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Partial update applied to one list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUpdate {
    title: Option<String>,
    favorited: Option<bool>,
}

impl ListUpdate {
    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the favourited flag.
    #[must_use]
    pub const fn with_favorited(mut self, favorited: bool) -> Self {
        self.favorited = Some(favorited);
        self
    }
}

/// Service-level errors for catalogue operations.
#[derive(Debug, Error)]
pub enum ListCatalogueError {
    /// No list with the given identifier exists for the caller.
    #[error("list not found: {0}")]
    NotFound(ListId),

    /// The caller already has a list with this title.
    #[error("list title already in use: {0}")]
    DuplicateTitle(String),

    /// The generation prompt is empty after trimming.
    #[error("prompt must not be empty")]
    EmptyPrompt,

    /// List title validation failed; nothing was written.
    #[error(transparent)]
    Validation(#[from] ListDomainError),

    /// A generated task title failed validation; nothing was written.
    #[error(transparent)]
    TaskValidation(#[from] TaskDomainError),

    /// The list generator declined or failed.
    #[error(transparent)]
    Generator(#[from] ListGeneratorError),

    /// List repository operation failed.
    #[error(transparent)]
    Repository(#[from] ListRepositoryError),

    /// Task repository operation failed during a cascade or seeding.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
}

/// Result type for catalogue service operations.
pub type ListCatalogueResult<T> = Result<T, ListCatalogueError>;

/// List catalogue orchestration service.
#[derive(Clone)]
pub struct ListCatalogueService<L, T, G, C>
where
    L: ListRepository,
    T: TaskRepository,
    G: ListGenerator,
    C: Clock + Send + Sync,
{
    lists: Arc<L>,
    tasks: Arc<T>,
    generator: Arc<G>,
    clock: Arc<C>,
}

impl<L, T, G, C> ListCatalogueService<L, T, G, C>
where
    L: ListRepository,
    T: TaskRepository,
    G: ListGenerator,
    C: Clock + Send + Sync,
{
    /// Creates a new catalogue service.
    #[must_use]
    pub const fn new(lists: Arc<L>, tasks: Arc<T>, generator: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            lists,
            tasks,
            generator,
            clock,
        }
    }

    /// Creates a new list for the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ListCatalogueError::Validation`] for an invalid title and
    /// [`ListCatalogueError::DuplicateTitle`] when the caller already has a
    /// list with the same title.
    pub async fn create(&self, owner: UserId, title: &str) -> ListCatalogueResult<List> {
        let list_title = ListTitle::new(title)?;
        let list = List::new(owner, list_title, &*self.clock);
        self.lists.insert(&list).await.map_err(map_title_conflict)?;

        debug!(list = %list.id(), owner = %owner, "created list");
        Ok(list)
    }

    /// Creates a list from a natural-language prompt via the generator
    /// port, seeding one task per generated title at positions `0..N-1`.
    ///
    /// Returns the created list together with its seeded tasks in order.
    ///
    /// # Errors
    ///
    /// Returns [`ListCatalogueError::EmptyPrompt`] for a blank prompt,
    /// [`ListCatalogueError::Generator`] when the provider declines or
    /// fails, and the usual validation and conflict errors for the
    /// generated titles.
    pub async fn create_from_prompt(
        &self,
        owner: UserId,
        prompt: &str,
    ) -> ListCatalogueResult<(List, Vec<Task>)> {
        if prompt.trim().is_empty() {
            return Err(ListCatalogueError::EmptyPrompt);
        }

        let generated = self.generator.generate(prompt).await?;
        let list_title = ListTitle::new(generated.title)?;

        // Validate every task title before writing anything.
        let mut seeded = Vec::with_capacity(generated.task_titles.len());
        let list = List::new(owner, list_title, &*self.clock);
        for (index, text) in generated.task_titles.into_iter().enumerate() {
            let title = TaskTitle::new(text)?;
            seeded.push(Task::new(
                list.id(),
                owner,
                title,
                Position::new(index),
                &*self.clock,
            ));
        }

        self.lists.insert(&list).await.map_err(map_title_conflict)?;
        self.tasks.insert_many(&seeded).await?;

        debug!(list = %list.id(), owner = %owner, tasks = seeded.len(), "created list from prompt");
        Ok((list, seeded))
    }

    /// Retrieves a list by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ListCatalogueError::NotFound`] when the list does not
    /// exist for the caller.
    pub async fn get(&self, owner: UserId, id: ListId) -> ListCatalogueResult<List> {
        self.lists
            .find_by_id(id, owner)
            .await?
            .ok_or(ListCatalogueError::NotFound(id))
    }

    /// Returns the caller's lists matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`ListCatalogueError::Repository`] when the lookup fails.
    pub async fn query(&self, owner: UserId, query: &ListQuery) -> ListCatalogueResult<Vec<List>> {
        Ok(self.lists.query(owner, query).await?)
    }

    /// Applies a partial update to a list.
    ///
    /// # Errors
    ///
    /// Returns [`ListCatalogueError::NotFound`] when the list does not
    /// exist for the caller, [`ListCatalogueError::Validation`] for an
    /// invalid title, and [`ListCatalogueError::DuplicateTitle`] when the
    /// new title collides with another of the caller's lists.
    pub async fn update(
        &self,
        owner: UserId,
        id: ListId,
        update: ListUpdate,
    ) -> ListCatalogueResult<List> {
        let mut list = self.get(owner, id).await?;
        if let Some(text) = update.title {
            list.rename(ListTitle::new(text)?, &*self.clock);
        }
        if let Some(favorited) = update.favorited {
            list.set_favorited(favorited, &*self.clock);
        }
        self.lists.update(&list).await.map_err(map_title_conflict)?;
        Ok(list)
    }

    /// Deletes a list and every task it holds.
    ///
    /// Tasks are removed before the list itself.
    ///
    /// # Errors
    ///
    /// Returns [`ListCatalogueError::NotFound`] when the list does not
    /// exist for the caller.
    pub async fn delete(&self, owner: UserId, id: ListId) -> ListCatalogueResult<()> {
        if !self.lists.exists(id, owner).await? {
            return Err(ListCatalogueError::NotFound(id));
        }
        let removed_tasks = self.tasks.delete_all_in_list(id, owner).await?;
        self.lists.delete(id, owner).await?;

        debug!(list = %id, owner = %owner, removed_tasks, "deleted list");
        Ok(())
    }

    /// Deletes every list belonging to the caller, with all their tasks.
    ///
    /// Removing zero lists is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ListCatalogueError::Repository`] or
    /// [`ListCatalogueError::TaskRepository`] when a store rejects the
    /// deletion.
    pub async fn delete_all(&self, owner: UserId) -> ListCatalogueResult<()> {
        let removed_tasks = self.tasks.delete_all_for_user(owner).await?;
        let removed_lists = self.lists.delete_all_for_user(owner).await?;

        debug!(
            owner = %owner,
            removed_lists = removed_lists.len(),
            removed_tasks,
            "deleted all lists"
        );
        Ok(())
    }

    /// Removes all catalogue data for a user being deleted.
    ///
    /// Identity removal itself lives outside this crate; the user-deletion
    /// path calls this to cascade lists and tasks.
    ///
    /// # Errors
    ///
    /// See [`Self::delete_all`]; the cascade is identical.
    pub async fn purge_user(&self, owner: UserId) -> ListCatalogueResult<()> {
        self.delete_all(owner).await
    }
}

/// Surfaces a repository title conflict as the service-level variant.
fn map_title_conflict(err: ListRepositoryError) -> ListCatalogueError {
    match err {
        ListRepositoryError::DuplicateTitle(title) => ListCatalogueError::DuplicateTitle(title),
        other => ListCatalogueError::Repository(other),
    }
}
