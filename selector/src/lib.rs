//! Instruction selection for a visual event-scripting editor.
//!
//! While a condition or action is edited, the user either picks a free
//! instruction or picks an object and then one of its instructions. This crate
//! tracks that choice and keeps the offered candidates consistent with it:
//!
//! - **[`core`]**: Pure, deterministic logic (types, lookups, scope filtering,
//!   display trees, selection state). No I/O.
//! - **[`platform`]**, **[`project`]**, **[`catalog`]**: In-memory instruction
//!   definitions and objects, and the catalog enumerating candidates from them.
//! - **[`editor`]**: The selection state machine.
//! - **[`io`]**: Loading catalogs, projects and configuration from disk.
//!
//! [`session`] replays scripted editing sessions for inspection and tests.

pub mod catalog;
pub mod core;
pub mod editor;
pub mod io;
pub mod logging;
pub mod platform;
pub mod project;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
