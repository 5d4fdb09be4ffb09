//! Ordered task store for Tidylist.
//!
//! This module owns the crate's central invariant: within one
//! (owner, list) scope the live tasks carry exactly the positions
//! `0..count-1`, with no gaps and no duplicates. Appends take the next
//! position, moves remove-and-reinsert over the ordered snapshot and
//! renumber the whole list, deletes close the gap they leave, and list
//! deletion cascades here. Renumbering is persisted as one atomic batch and
//! mutations on one scope serialize behind a per-scope lock, so the
//! invariant also holds under concurrent callers and partial-failure
//! scenarios. The module follows hexagonal architecture:
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
