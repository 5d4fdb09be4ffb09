//! Tidylist: multi-tenant list and task management core.
//!
//! This crate provides the persistence-backed core of a personal task
//! manager: user-owned named lists, each holding tasks with a dense,
//! gap-free ordering that survives appends, moves, and deletes.
//!
//! # Architecture
//!
//! Tidylist follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`list`]: List catalogue, lookup queries, and cascade deletion
//! - [`task`]: Ordered task store maintaining contiguous positions

pub mod list;
pub mod task;
