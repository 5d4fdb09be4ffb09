//! `PostgreSQL` repository implementation for list storage.

use super::{
    models::{ListRow, NewListRow},
    schema::lists,
};
use crate::list::{
    domain::{List, ListId, ListQuery, ListSort, ListTitle, PersistedListData, UserId},
    ports::{ListRepository, ListRepositoryError, ListRepositoryResult},
};
use async_trait::async_trait;
use diesel::PgTextExpressionMethods;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by list adapters.
pub type ListPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed list repository.
#[derive(Debug, Clone)]
pub struct PostgresListRepository {
    pool: ListPgPool,
}

impl PostgresListRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ListPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ListRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ListRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ListRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ListRepositoryError::persistence)?
    }
}

impl From<DieselError> for ListRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl ListRepository for PostgresListRepository {
    async fn insert(&self, list: &List) -> ListRepositoryResult<()> {
        let list_id = list.id();
        let title = list.title().as_str().to_owned();
        let new_row = to_new_row(list);

        self.run_blocking(move |connection| {
            diesel::insert_into(lists::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_owner_title_unique_violation(info.as_ref()) =>
                    {
                        ListRepositoryError::DuplicateTitle(title.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ListRepositoryError::DuplicateList(list_id)
                    }
                    _ => ListRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, list: &List) -> ListRepositoryResult<()> {
        let list_id = list.id();
        let owner = list.user_id().into_inner();
        let title = list.title().as_str().to_owned();
        let favorited = list.favorited();
        let updated_at = list.updated_at();

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                lists::table
                    .filter(lists::id.eq(list_id.into_inner()))
                    .filter(lists::user_id.eq(owner)),
            )
            .set((
                lists::title.eq(title.clone()),
                lists::favorited.eq(favorited),
                lists::updated_at.eq(updated_at),
            ))
            .execute(connection)
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                    if is_owner_title_unique_violation(info.as_ref()) =>
                {
                    ListRepositoryError::DuplicateTitle(title.clone())
                }
                _ => ListRepositoryError::persistence(err),
            })?;

            if affected == 0 {
                return Err(ListRepositoryError::NotFound(list_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ListId, owner: UserId) -> ListRepositoryResult<Option<List>> {
        self.run_blocking(move |connection| {
            let row = lists::table
                .filter(lists::id.eq(id.into_inner()))
                .filter(lists::user_id.eq(owner.into_inner()))
                .select(ListRow::as_select())
                .first::<ListRow>(connection)
                .optional()?;
            row.map(row_to_list).transpose()
        })
        .await
    }

    async fn exists(&self, id: ListId, owner: UserId) -> ListRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let count: i64 = lists::table
                .filter(lists::id.eq(id.into_inner()))
                .filter(lists::user_id.eq(owner.into_inner()))
                .count()
                .get_result(connection)?;
            Ok(count > 0)
        })
        .await
    }

    async fn query(&self, owner: UserId, query: &ListQuery) -> ListRepositoryResult<Vec<List>> {
        let favorited = query.favorited();
        let pattern = query.search().map(search_pattern);
        let sort = query.sort();
        let offset = i64::try_from(query.offset()).map_err(ListRepositoryError::persistence)?;
        let limit = i64::from(query.limit());

        self.run_blocking(move |connection| {
            let mut selection = lists::table
                .filter(lists::user_id.eq(owner.into_inner()))
                .into_boxed();
            if let Some(flag) = favorited {
                selection = selection.filter(lists::favorited.eq(flag));
            }
            if let Some(fragment) = pattern {
                selection = selection.filter(lists::title.ilike(fragment));
            }
            selection = match sort {
                ListSort::CreatedDescending => selection.order(lists::created_at.desc()),
                ListSort::CreatedAscending => selection.order(lists::created_at.asc()),
                ListSort::TitleAscending => selection.order(lists::title.asc()),
                ListSort::TitleDescending => selection.order(lists::title.desc()),
            };

            let rows = selection
                .offset(offset)
                .limit(limit)
                .select(ListRow::as_select())
                .load::<ListRow>(connection)?;
            rows.into_iter().map(row_to_list).collect()
        })
        .await
    }

    async fn delete(&self, id: ListId, owner: UserId) -> ListRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                lists::table
                    .filter(lists::id.eq(id.into_inner()))
                    .filter(lists::user_id.eq(owner.into_inner())),
            )
            .execute(connection)?;
            Ok(affected > 0)
        })
        .await
    }

    async fn delete_all_for_user(&self, owner: UserId) -> ListRepositoryResult<Vec<ListId>> {
        self.run_blocking(move |connection| {
            let removed: Vec<uuid::Uuid> =
                diesel::delete(lists::table.filter(lists::user_id.eq(owner.into_inner())))
                    .returning(lists::id)
                    .get_results(connection)?;
            Ok(removed.into_iter().map(ListId::from_uuid).collect())
        })
        .await
    }
}

fn to_new_row(list: &List) -> NewListRow {
    NewListRow {
        id: list.id().into_inner(),
        user_id: list.user_id().into_inner(),
        title: list.title().as_str().to_owned(),
        favorited: list.favorited(),
        created_at: list.created_at(),
        updated_at: list.updated_at(),
    }
}

fn row_to_list(row: ListRow) -> ListRepositoryResult<List> {
    let ListRow {
        id,
        user_id,
        title: persisted_title,
        favorited,
        created_at,
        updated_at,
    } = row;

    let title = ListTitle::new(persisted_title).map_err(ListRepositoryError::persistence)?;

    let data = PersistedListData {
        id: ListId::from_uuid(id),
        user_id: UserId::from_uuid(user_id),
        title,
        favorited,
        created_at,
        updated_at,
    };
    Ok(List::from_persisted(data))
}

fn is_owner_title_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_lists_owner_title_unique")
}

/// Builds an `ILIKE` pattern matching the fragment anywhere in the title,
/// escaping the wildcard characters so user input matches literally.
fn search_pattern(fragment: &str) -> String {
    let escaped = fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
