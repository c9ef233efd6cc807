//! Domain types and view-state rules for the hntr records console.
//!
//! This crate has no I/O. It holds the JSON shapes exchanged with the box
//! API and the pure logic the console applies around them: tag
//! normalization, filter terms, pagination, row selection, form
//! validation and run guarding.

pub mod error;
pub mod filter;
pub mod format;
pub mod forms;
pub mod instructions;
pub mod models;
pub mod pagination;
pub mod run_control;
pub mod selection;
pub mod tags;
pub mod types;
pub mod view;
