//! Per-(owner, list) mutual exclusion for ordering mutations.

use crate::task::domain::{ListId, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of one async mutex per (owner, list) scope.
///
/// Mutations that read, renumber, and rewrite a list hold the scope's mutex
/// across the whole sequence, so concurrent writers on one list serialize
/// while different lists proceed in parallel. Entries are retained for the
/// lifetime of the service; the scope count is bounded by the lists a
/// process actually touches.
#[derive(Debug, Default)]
pub(super) struct ScopeLocks {
    scopes: Mutex<HashMap<(UserId, ListId), Arc<Mutex<()>>>>,
}

impl ScopeLocks {
    /// Acquires the mutex guarding the given scope.
    pub(super) async fn acquire(&self, owner: UserId, list_id: ListId) -> OwnedMutexGuard<()> {
        let slot = {
            let mut scopes = self.scopes.lock().await;
            Arc::clone(scopes.entry((owner, list_id)).or_default())
        };
        slot.lock_owned().await
    }
}
