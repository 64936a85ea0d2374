//! Deterministic, pure logic shared by the selector.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod instruction;
pub mod invariants;
pub mod lookup;
pub mod scope;
pub mod selection;
pub mod tree;
pub mod types;
