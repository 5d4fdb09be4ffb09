//! Domain model for the ordered task store.
//!
//! Tasks are actionable items owned by a user inside one list, carrying a
//! zero-based position that is dense within the (owner, list) scope.

mod error;
mod ids;
mod task;
mod title;

pub use error::TaskDomainError;
pub use ids::{Position, TaskId};
pub use task::{PersistedTaskData, Task};
pub use title::TaskTitle;

pub use crate::list::domain::{ListId, UserId};
