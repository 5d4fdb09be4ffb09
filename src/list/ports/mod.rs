//! Port contracts for the list catalogue.

pub mod generator;
pub mod repository;

pub use generator::{GeneratedList, ListGenerator, ListGeneratorError};
pub use repository::{ListRepository, ListRepositoryError, ListRepositoryResult};
