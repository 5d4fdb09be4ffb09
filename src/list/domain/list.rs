//! List aggregate root.

use super::{ListId, ListTitle, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// List aggregate root: a named, user-owned container of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    id: ListId,
    user_id: UserId,
    title: ListTitle,
    favorited: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted list aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedListData {
    /// Persisted list identifier.
    pub id: ListId,
    /// Persisted owner identifier.
    pub user_id: UserId,
    /// Persisted validated title.
    pub title: ListTitle,
    /// Persisted favourited flag.
    pub favorited: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl List {
    /// Creates a new list owned by the given user.
    #[must_use]
    pub fn new(user_id: UserId, title: ListTitle, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ListId::new(),
            user_id,
            title,
            favorited: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a list from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedListData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            title: data.title,
            favorited: data.favorited,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> ListId {
        self.id
    }

    /// Returns the owning user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the list title.
    #[must_use]
    pub const fn title(&self) -> &ListTitle {
        &self.title
    }

    /// Returns whether the list is favourited.
    #[must_use]
    pub const fn favorited(&self) -> bool {
        self.favorited
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the title.
    pub fn rename(&mut self, title: ListTitle, clock: &impl Clock) {
        self.title = title;
        self.touch(clock);
    }

    /// Sets the favourited flag.
    pub fn set_favorited(&mut self, favorited: bool, clock: &impl Clock) {
        self.favorited = favorited;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
