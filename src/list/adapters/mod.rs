//! Adapter implementations of the list catalogue ports.

pub mod memory;
pub mod postgres;
