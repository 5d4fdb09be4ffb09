//! Orchestration services for the ordered task store.

mod locks;
mod ordering;

pub use ordering::{TaskOrderingError, TaskOrderingResult, TaskOrderingService, TaskUpdate};
