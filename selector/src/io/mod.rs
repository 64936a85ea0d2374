//! I/O helpers for loading selector inputs.

pub mod catalog_store;
pub mod config;
