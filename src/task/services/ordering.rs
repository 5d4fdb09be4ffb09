//! Service layer maintaining the dense per-list task ordering.
//!
//! For every (owner, list) scope the live tasks carry exactly the positions
//! `0..count-1`. Appends take the next position without touching existing
//! rows; moves and deletes reload the ordered snapshot, splice it, and
//! renumber the whole list before persisting the result as one atomic
//! batch. Mutations on a scope serialize behind [`ScopeLocks`], so the
//! invariant holds under concurrent callers.

use super::locks::ScopeLocks;
use crate::list::ports::{ListRepository, ListRepositoryError};
use crate::task::{
    domain::{ListId, Position, Task, TaskDomainError, TaskId, TaskTitle, UserId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Partial update applied to one task.
///
/// Mirrors the caller-facing update surface: any combination of a new
/// title, a completion flag, and a requested position. The requested
/// position may be any integer; it is clamped into the valid range rather
/// than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    title: Option<String>,
    completed: Option<bool>,
    position: Option<i64>,
}

impl TaskUpdate {
    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Requests a move to the given position.
    #[must_use]
    pub const fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }
}

/// Service-level errors for ordering operations.
#[derive(Debug, Error)]
pub enum TaskOrderingError {
    /// No list with the given identifier exists for the caller.
    #[error("list not found: {0}")]
    ListNotFound(ListId),

    /// No task with the given identifier exists for the caller.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A batch move referenced a task outside the reordered list.
    #[error("task {task_id} does not belong to list {list_id}")]
    TaskOutsideList {
        /// The referenced task.
        task_id: TaskId,
        /// The list being reordered.
        list_id: ListId,
    },

    /// Domain validation failed; nothing was written.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// List repository lookup failed.
    #[error(transparent)]
    ListRepository(#[from] ListRepositoryError),
}

/// Result type for ordering service operations.
pub type TaskOrderingResult<T> = Result<T, TaskOrderingError>;

/// Ordered task store orchestration service.
#[derive(Clone)]
pub struct TaskOrderingService<T, L, C>
where
    T: TaskRepository,
    L: ListRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    lists: Arc<L>,
    clock: Arc<C>,
    locks: Arc<ScopeLocks>,
}

impl<T, L, C> TaskOrderingService<T, L, C>
where
    T: TaskRepository,
    L: ListRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new ordering service.
    #[must_use]
    pub fn new(tasks: Arc<T>, lists: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            lists,
            clock,
            locks: Arc::new(ScopeLocks::default()),
        }
    }

    /// Appends a new incomplete task at the end of the list.
    ///
    /// The new task takes position `max + 1`, or `0` when the list is
    /// empty; existing rows are not rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderingError::ListNotFound`] when the list does not
    /// exist for the caller and [`TaskOrderingError::Validation`] when the
    /// title is empty or too long. Validation runs before any write.
    pub async fn append(
        &self,
        list_id: ListId,
        owner: UserId,
        title: &str,
    ) -> TaskOrderingResult<Task> {
        let task_title = TaskTitle::new(title)?;
        let _guard = self.locks.acquire(owner, list_id).await;

        if !self.lists.exists(list_id, owner).await? {
            return Err(TaskOrderingError::ListNotFound(list_id));
        }

        let position = self
            .tasks
            .max_position(list_id, owner)
            .await?
            .map_or(Position::ZERO, Position::next);
        let task = Task::new(list_id, owner, task_title, position, &*self.clock);
        self.tasks.insert(&task).await?;

        debug!(task = %task.id(), list = %list_id, position = %position, "appended task");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderingError::TaskNotFound`] when the task does not
    /// exist for the caller.
    pub async fn get(&self, id: TaskId, owner: UserId) -> TaskOrderingResult<Task> {
        self.tasks
            .find_by_id(id, owner)
            .await?
            .ok_or(TaskOrderingError::TaskNotFound(id))
    }

    /// Returns the live tasks of a list ordered ascending by position.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderingError::ListNotFound`] when the list does not
    /// exist for the caller.
    pub async fn tasks_in_list(
        &self,
        list_id: ListId,
        owner: UserId,
    ) -> TaskOrderingResult<Vec<Task>> {
        if !self.lists.exists(list_id, owner).await? {
            return Err(TaskOrderingError::ListNotFound(list_id));
        }
        Ok(self.tasks.list_ordered(list_id, owner).await?)
    }

    /// Applies a partial update to a task.
    ///
    /// Title and completion edits always apply. A requested position is
    /// clamped into `[0, count-1]`; when the clamped target differs from
    /// the current position the list is spliced and renumbered as a whole,
    /// otherwise only the single row is rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderingError::TaskNotFound`] when the task does not
    /// exist for the caller and [`TaskOrderingError::Validation`] for an
    /// invalid title.
    pub async fn update(
        &self,
        id: TaskId,
        owner: UserId,
        update: TaskUpdate,
    ) -> TaskOrderingResult<Task> {
        // A task never migrates between lists, so the scope key read here
        // stays valid once the lock is held.
        let located = self.locate(id, owner).await?;
        let _guard = self.locks.acquire(owner, located.list_id()).await;

        let mut task = self.locate(id, owner).await?;
        if let Some(text) = update.title {
            task.rename(TaskTitle::new(text)?, &*self.clock);
        }
        if let Some(completed) = update.completed {
            task.set_completed(completed, &*self.clock);
        }

        match update.position {
            Some(requested) => self.apply_move(task, requested).await,
            None => {
                self.tasks.update(&task).await?;
                Ok(task)
            }
        }
    }

    /// Moves a task to the given position, clamped into `[0, count-1]`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderingError::TaskNotFound`] when the task does not
    /// exist for the caller.
    pub async fn reposition(
        &self,
        id: TaskId,
        owner: UserId,
        position: i64,
    ) -> TaskOrderingResult<Task> {
        self.update(id, owner, TaskUpdate::default().with_position(position))
            .await
    }

    /// Deletes a task and closes the gap it leaves.
    ///
    /// The survivors are renumbered to `0..count-1` in their current
    /// relative order and persisted as one atomic batch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderingError::TaskNotFound`] when the task does not
    /// exist for the caller.
    pub async fn delete(&self, id: TaskId, owner: UserId) -> TaskOrderingResult<()> {
        let located = self.locate(id, owner).await?;
        let _guard = self.locks.acquire(owner, located.list_id()).await;

        if !self.tasks.delete(id, owner).await? {
            return Err(TaskOrderingError::TaskNotFound(id));
        }
        let mut survivors = self.tasks.list_ordered(located.list_id(), owner).await?;
        renumber(&mut survivors, &*self.clock);
        self.tasks.persist_order(&survivors).await?;

        debug!(task = %id, list = %located.list_id(), "deleted task");
        Ok(())
    }

    /// Applies a batch of position moves to one list.
    ///
    /// Each move is a remove-and-reinsert over the same ordered snapshot;
    /// the final order is renumbered and persisted once, so the batch
    /// cannot partially apply. Returns the list in its new order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderingError::ListNotFound`] when the list does not
    /// exist for the caller and [`TaskOrderingError::TaskOutsideList`] when
    /// a move references a task from another list; in both cases nothing is
    /// written.
    pub async fn reorder(
        &self,
        list_id: ListId,
        owner: UserId,
        moves: &[(TaskId, i64)],
    ) -> TaskOrderingResult<Vec<Task>> {
        let _guard = self.locks.acquire(owner, list_id).await;

        if !self.lists.exists(list_id, owner).await? {
            return Err(TaskOrderingError::ListNotFound(list_id));
        }

        let mut ordered = self.tasks.list_ordered(list_id, owner).await?;
        for &(task_id, requested) in moves {
            let from = ordered
                .iter()
                .position(|task| task.id() == task_id)
                .ok_or(TaskOrderingError::TaskOutsideList { task_id, list_id })?;
            let target = clamp_position(requested, ordered.len());
            let task = ordered.remove(from);
            ordered.insert(target, task);
        }
        renumber(&mut ordered, &*self.clock);
        self.tasks.persist_order(&ordered).await?;

        debug!(list = %list_id, moves = moves.len(), "reordered list");
        Ok(ordered)
    }

    /// Removes every task of a deleted list, returning the removed count.
    ///
    /// Invoked by the list deletion paths; idempotent, so cascading an
    /// already-empty list is a no-op. No renumbering is needed since the
    /// whole scope is removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderingError::Repository`] when the store rejects the
    /// deletion.
    pub async fn cascade_delete_list(
        &self,
        list_id: ListId,
        owner: UserId,
    ) -> TaskOrderingResult<u64> {
        let _guard = self.locks.acquire(owner, list_id).await;
        let removed = self.tasks.delete_all_in_list(list_id, owner).await?;
        debug!(list = %list_id, removed, "cascaded list deletion");
        Ok(removed)
    }

    async fn locate(&self, id: TaskId, owner: UserId) -> TaskOrderingResult<Task> {
        self.tasks
            .find_by_id(id, owner)
            .await?
            .ok_or(TaskOrderingError::TaskNotFound(id))
    }

    /// Splices the task to the clamped target and renumbers the list.
    async fn apply_move(&self, task: Task, requested: i64) -> TaskOrderingResult<Task> {
        let id = task.id();
        let mut ordered = self
            .tasks
            .list_ordered(task.list_id(), task.user_id())
            .await?;
        let target = clamp_position(requested, ordered.len());

        if Position::new(target) == task.position() {
            // No reorder; persist field edits only.
            self.tasks.update(&task).await?;
            return Ok(task);
        }

        ordered.retain(|entry| entry.id() != id);
        ordered.insert(target, task);
        renumber(&mut ordered, &*self.clock);
        self.tasks.persist_order(&ordered).await?;

        debug!(task = %id, position = target, "repositioned task");
        ordered
            .into_iter()
            .find(|entry| entry.id() == id)
            .ok_or(TaskOrderingError::TaskNotFound(id))
    }
}

/// Clamps a requested position into `[0, count-1]`.
///
/// Negative requests become `0`; requests at or beyond the count become
/// `count - 1`. Out-of-range targets are normalized rather than rejected.
fn clamp_position(requested: i64, count: usize) -> usize {
    let last = count.saturating_sub(1);
    usize::try_from(requested).map_or(0, |index| index.min(last))
}

/// Rewrites positions to `0..count-1` in sequence order.
///
/// Rows already at their index are left untouched so their modification
/// timestamps stay meaningful.
fn renumber(tasks: &mut [Task], clock: &impl Clock) {
    for (index, task) in tasks.iter_mut().enumerate() {
        let position = Position::new(index);
        if task.position() != position {
            task.move_to(position, clock);
        }
    }
}
