//! Domain model for the list catalogue.
//!
//! The list domain models user-owned named containers of tasks: validated
//! titles, a favourited flag, and the filter/sort/page parameters used for
//! catalogue lookup. All infrastructure concerns stay outside the domain
//! boundary.

mod error;
mod ids;
mod list;
mod query;
mod title;

pub use error::ListDomainError;
pub use ids::{ListId, UserId};
pub use list::{List, PersistedListData};
pub use query::{ListQuery, ListSort};
pub use title::ListTitle;
