//! In-memory list repository for tests and single-process deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::list::{
    domain::{List, ListId, ListQuery, ListSort, UserId},
    ports::{ListRepository, ListRepositoryError, ListRepositoryResult},
};

/// Thread-safe in-memory list repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryListRepository {
    state: Arc<RwLock<HashMap<ListId, List>>>,
}

impl InMemoryListRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ListRepositoryResult<RwLockReadGuard<'_, HashMap<ListId, List>>> {
        self.state.read().map_err(|err| {
            ListRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> ListRepositoryResult<RwLockWriteGuard<'_, HashMap<ListId, List>>> {
        self.state.write().map_err(|err| {
            ListRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn title_taken(state: &HashMap<ListId, List>, candidate: &List) -> bool {
    state.values().any(|list| {
        list.id() != candidate.id()
            && list.user_id() == candidate.user_id()
            && list.title() == candidate.title()
    })
}

fn matches(list: &List, owner: UserId, query: &ListQuery) -> bool {
    if list.user_id() != owner {
        return false;
    }
    if query.favorited().is_some_and(|flag| list.favorited() != flag) {
        return false;
    }
    if let Some(fragment) = query.search() {
        let haystack = list.title().as_str().to_lowercase();
        if !haystack.contains(&fragment.to_lowercase()) {
            return false;
        }
    }
    true
}

fn sort(lists: &mut [List], order: ListSort) {
    match order {
        ListSort::CreatedDescending => {
            lists.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        }
        ListSort::CreatedAscending => {
            lists.sort_by(|a, b| a.created_at().cmp(&b.created_at()));
        }
        ListSort::TitleAscending => {
            lists.sort_by(|a, b| a.title().as_str().cmp(b.title().as_str()));
        }
        ListSort::TitleDescending => {
            lists.sort_by(|a, b| b.title().as_str().cmp(a.title().as_str()));
        }
    }
}

#[async_trait]
impl ListRepository for InMemoryListRepository {
    async fn insert(&self, list: &List) -> ListRepositoryResult<()> {
        let mut state = self.write()?;
        if state.contains_key(&list.id()) {
            return Err(ListRepositoryError::DuplicateList(list.id()));
        }
        if title_taken(&state, list) {
            return Err(ListRepositoryError::DuplicateTitle(
                list.title().as_str().to_owned(),
            ));
        }
        state.insert(list.id(), list.clone());
        Ok(())
    }

    async fn update(&self, list: &List) -> ListRepositoryResult<()> {
        let mut state = self.write()?;
        if !state
            .get(&list.id())
            .is_some_and(|stored| stored.user_id() == list.user_id())
        {
            return Err(ListRepositoryError::NotFound(list.id()));
        }
        if title_taken(&state, list) {
            return Err(ListRepositoryError::DuplicateTitle(
                list.title().as_str().to_owned(),
            ));
        }
        state.insert(list.id(), list.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ListId, owner: UserId) -> ListRepositoryResult<Option<List>> {
        let state = self.read()?;
        Ok(state
            .get(&id)
            .filter(|list| list.user_id() == owner)
            .cloned())
    }

    async fn exists(&self, id: ListId, owner: UserId) -> ListRepositoryResult<bool> {
        let state = self.read()?;
        Ok(state.get(&id).is_some_and(|list| list.user_id() == owner))
    }

    async fn query(&self, owner: UserId, query: &ListQuery) -> ListRepositoryResult<Vec<List>> {
        let state = self.read()?;
        let mut lists: Vec<List> = state
            .values()
            .filter(|list| matches(list, owner, query))
            .cloned()
            .collect();
        sort(&mut lists, query.sort());

        let offset = usize::try_from(query.offset()).map_err(ListRepositoryError::persistence)?;
        let limit = usize::try_from(query.limit()).map_err(ListRepositoryError::persistence)?;
        Ok(lists.into_iter().skip(offset).take(limit).collect())
    }

    async fn delete(&self, id: ListId, owner: UserId) -> ListRepositoryResult<bool> {
        let mut state = self.write()?;
        let owned = state.get(&id).is_some_and(|list| list.user_id() == owner);
        if owned {
            state.remove(&id);
        }
        Ok(owned)
    }

    async fn delete_all_for_user(&self, owner: UserId) -> ListRepositoryResult<Vec<ListId>> {
        let mut state = self.write()?;
        let removed: Vec<ListId> = state
            .values()
            .filter(|list| list.user_id() == owner)
            .map(List::id)
            .collect();
        for id in &removed {
            state.remove(id);
        }
        Ok(removed)
    }
}
