//! In-memory task repository for tests and single-process deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{ListId, Position, Task, TaskId, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Every port operation runs under one lock acquisition, so the batch
/// operations (`insert_many`, `persist_order`, the cascade deletes) are
/// atomic with respect to concurrent readers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, HashMap<TaskId, Task>>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, HashMap<TaskId, Task>>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn in_scope(task: &Task, list_id: ListId, owner: UserId) -> bool {
    task.list_id() == list_id && task.user_id() == owner
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn insert_many(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if let Some(duplicate) = tasks.iter().find(|task| state.contains_key(&task.id())) {
            return Err(TaskRepositoryError::DuplicateTask(duplicate.id()));
        }
        for task in tasks {
            state.insert(task.id(), task.clone());
        }
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .get_mut(&task.id())
            .filter(|stored| stored.user_id() == task.user_id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId, owner: UserId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state
            .get(&id)
            .filter(|task| task.user_id() == owner)
            .cloned())
    }

    async fn list_ordered(
        &self,
        list_id: ListId,
        owner: UserId,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .values()
            .filter(|task| in_scope(task, list_id, owner))
            .cloned()
            .collect();
        tasks.sort_by_key(Task::position);
        Ok(tasks)
    }

    async fn max_position(
        &self,
        list_id: ListId,
        owner: UserId,
    ) -> TaskRepositoryResult<Option<Position>> {
        let state = self.read()?;
        Ok(state
            .values()
            .filter(|task| in_scope(task, list_id, owner))
            .map(Task::position)
            .max())
    }

    async fn persist_order(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        // Validate the whole batch before the first write so a stale task
        // cannot leave a half-applied order behind.
        if let Some(missing) = tasks.iter().find(|task| !state.contains_key(&task.id())) {
            return Err(TaskRepositoryError::NotFound(missing.id()));
        }
        for task in tasks {
            state.insert(task.id(), task.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: TaskId, owner: UserId) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        let owned = state.get(&id).is_some_and(|task| task.user_id() == owner);
        if owned {
            state.remove(&id);
        }
        Ok(owned)
    }

    async fn delete_all_in_list(
        &self,
        list_id: ListId,
        owner: UserId,
    ) -> TaskRepositoryResult<u64> {
        let mut state = self.write()?;
        let before = state.len();
        state.retain(|_, task| !in_scope(task, list_id, owner));
        removed_count(before, state.len())
    }

    async fn delete_all_for_user(&self, owner: UserId) -> TaskRepositoryResult<u64> {
        let mut state = self.write()?;
        let before = state.len();
        state.retain(|_, task| task.user_id() != owner);
        removed_count(before, state.len())
    }
}

fn removed_count(before: usize, after: usize) -> TaskRepositoryResult<u64> {
    u64::try_from(before.saturating_sub(after)).map_err(TaskRepositoryError::persistence)
}
