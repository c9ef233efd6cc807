//! Terminal console for hntr boxes.
//!
//! Pages fetch through `hntr-client` resources and render plain text
//! through [`views`]. The `hntr` binary parses the command line and prints
//! what [`app::run`] produces.

pub mod app;
pub mod cli;
pub mod context;
pub mod error;
pub mod pages;
pub mod views;
