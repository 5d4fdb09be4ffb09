//! Orchestration services for the list catalogue.

mod catalogue;

pub use catalogue::{
    ListCatalogueError, ListCatalogueResult, ListCatalogueService, ListUpdate,
};
