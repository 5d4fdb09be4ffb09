//! `PostgreSQL` repository implementation for task storage.
//!
//! Uses Diesel with r2d2 pooling; blocking work runs on
//! [`tokio::task::spawn_blocking`]. The renumbering batch
//! ([`TaskRepository::persist_order`]) executes inside a single transaction
//! so a dense position range is never torn by a partial write.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{ListId, PersistedTaskData, Position, Task, TaskId, TaskTitle, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn insert_many(&self, batch: &[Task]) -> TaskRepositoryResult<()> {
        let rows = batch
            .iter()
            .map(to_new_row)
            .collect::<TaskRepositoryResult<Vec<_>>>()?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&rows)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changes = row_changes(task)?;
        let owner = task.user_id().into_inner();

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::user_id.eq(owner)),
            )
            .set(changes)
            .execute(connection)?;

            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId, owner: UserId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::user_id.eq(owner.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_ordered(
        &self,
        list_id: ListId,
        owner: UserId,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::list_id.eq(list_id.into_inner()))
                .filter(tasks::user_id.eq(owner.into_inner()))
                .order(tasks::position.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn max_position(
        &self,
        list_id: ListId,
        owner: UserId,
    ) -> TaskRepositoryResult<Option<Position>> {
        self.run_blocking(move |connection| {
            let max: Option<i64> = tasks::table
                .filter(tasks::list_id.eq(list_id.into_inner()))
                .filter(tasks::user_id.eq(owner.into_inner()))
                .select(diesel::dsl::max(tasks::position))
                .first(connection)?;
            max.map(position_from_row).transpose()
        })
        .await
    }

    async fn persist_order(&self, batch: &[Task]) -> TaskRepositoryResult<()> {
        let updates = batch
            .iter()
            .map(|task| {
                Ok((
                    task.id(),
                    task.user_id().into_inner(),
                    position_to_row(task.position())?,
                    task.updated_at(),
                ))
            })
            .collect::<TaskRepositoryResult<Vec<_>>>()?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|transaction| {
                for (task_id, owner, position, updated_at) in &updates {
                    let affected = diesel::update(
                        tasks::table
                            .filter(tasks::id.eq(task_id.into_inner()))
                            .filter(tasks::user_id.eq(owner)),
                    )
                    .set((
                        tasks::position.eq(position),
                        tasks::updated_at.eq(updated_at),
                    ))
                    .execute(transaction)?;

                    if affected == 0 {
                        return Err(TaskRepositoryError::NotFound(*task_id));
                    }
                }
                Ok(())
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId, owner: UserId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::user_id.eq(owner.into_inner())),
            )
            .execute(connection)?;
            Ok(affected > 0)
        })
        .await
    }

    async fn delete_all_in_list(
        &self,
        list_id: ListId,
        owner: UserId,
    ) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                tasks::table
                    .filter(tasks::list_id.eq(list_id.into_inner()))
                    .filter(tasks::user_id.eq(owner.into_inner())),
            )
            .execute(connection)?;
            u64::try_from(affected).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn delete_all_for_user(&self, owner: UserId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                tasks::table.filter(tasks::user_id.eq(owner.into_inner())),
            )
            .execute(connection)?;
            u64::try_from(affected).map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

type TaskChanges = (
    diesel::dsl::Eq<tasks::title, String>,
    diesel::dsl::Eq<tasks::completed, bool>,
    diesel::dsl::Eq<tasks::position, i64>,
    diesel::dsl::Eq<tasks::updated_at, chrono::DateTime<chrono::Utc>>,
);

fn row_changes(task: &Task) -> TaskRepositoryResult<TaskChanges> {
    Ok((
        tasks::title.eq(task.title().as_str().to_owned()),
        tasks::completed.eq(task.completed()),
        tasks::position.eq(position_to_row(task.position())?),
        tasks::updated_at.eq(task.updated_at()),
    ))
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        list_id: task.list_id().into_inner(),
        user_id: task.user_id().into_inner(),
        title: task.title().as_str().to_owned(),
        completed: task.completed(),
        position: position_to_row(task.position())?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        list_id,
        user_id,
        title: persisted_title,
        completed,
        position: persisted_position,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let position = position_from_row(persisted_position)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        list_id: ListId::from_uuid(list_id),
        user_id: UserId::from_uuid(user_id),
        title,
        completed,
        position,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn position_to_row(position: Position) -> TaskRepositoryResult<i64> {
    i64::try_from(position.index()).map_err(TaskRepositoryError::persistence)
}

fn position_from_row(value: i64) -> TaskRepositoryResult<Position> {
    usize::try_from(value)
        .map(Position::new)
        .map_err(TaskRepositoryError::persistence)
}
