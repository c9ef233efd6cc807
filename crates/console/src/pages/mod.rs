//! Console pages: fetch through the client, render through the views.
//!
//! Read failures are rendered as page text; a page only returns an error
//! when a command could not be carried out.

pub mod automations;
pub mod boxes;
pub mod records;
