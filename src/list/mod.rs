//! List catalogue for Tidylist.
//!
//! This module owns user-scoped named lists: creation with per-owner title
//! uniqueness, partial updates, filtered and paginated lookup, prompt-seeded
//! creation through the generator port, and the three deletion paths (single
//! list, all lists, user purge) that cascade task removal so a task never
//! outlives its parent list. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
