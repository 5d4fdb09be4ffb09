//! In-memory adapter for the task repository port.

mod task;

pub use task::InMemoryTaskRepository;
