//! Repository port for task persistence and position management.

use crate::task::domain::{ListId, Position, Task, TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract. Every operation is scoped to an owner.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Stores a batch of new tasks in one write.
    ///
    /// Used when seeding a freshly created list; the batch either persists
    /// completely or not at all.
    async fn insert_many(&self, tasks: &[Task]) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (title, completion, position,
    /// timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task with the given
    /// ID exists for the owner.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier, scoped to the owner.
    ///
    /// Returns `None` when the task does not exist or belongs to another
    /// user.
    async fn find_by_id(&self, id: TaskId, owner: UserId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the live tasks of a list ordered ascending by position.
    async fn list_ordered(&self, list_id: ListId, owner: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the highest position in use within the list, or `None` when
    /// the list holds no tasks.
    async fn max_position(
        &self,
        list_id: ListId,
        owner: UserId,
    ) -> TaskRepositoryResult<Option<Position>>;

    /// Rewrites the position and modification timestamp of every given task
    /// as one atomic batch.
    ///
    /// This is the renumbering primitive: either every row reflects the new
    /// order afterwards or none does, so a dense position range can never be
    /// torn by a partial write.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when any of the tasks no
    /// longer exists; in that case nothing is written.
    async fn persist_order(&self, tasks: &[Task]) -> TaskRepositoryResult<()>;

    /// Removes a task, returning whether a record was deleted.
    async fn delete(&self, id: TaskId, owner: UserId) -> TaskRepositoryResult<bool>;

    /// Removes every task of the given list, returning the removed count.
    ///
    /// Idempotent: deleting the tasks of an empty or unknown list is a
    /// no-op.
    async fn delete_all_in_list(
        &self,
        list_id: ListId,
        owner: UserId,
    ) -> TaskRepositoryResult<u64>;

    /// Removes every task belonging to the owner, across all their lists,
    /// returning the removed count.
    ///
    /// Used by the bulk deletion paths, which remove tasks before their
    /// lists so a task never outlives its parent.
    async fn delete_all_for_user(&self, owner: UserId) -> TaskRepositoryResult<u64>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found for the owner.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
