//! Link management commands
//!
//! This module provides CLI commands for creating, resolving and inspecting
//! short links.

mod add;
mod batch;
mod clear;
mod helpers;
mod list;
mod open;
mod stats;

pub use add::add_link;
pub use batch::batch_links;
pub use clear::clear_links;
pub use list::list_links;
pub use open::open_link;
pub use stats::show_stats;
