//! In-memory adapter for the list repository port.

mod list;

pub use list::InMemoryListRepository;
