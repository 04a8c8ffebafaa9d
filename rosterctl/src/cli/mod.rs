//! Subcommand implementations for `rosterctl`.

pub mod list;
pub mod show;
pub mod tui;

pub use list::{ListOptions, run_list};
pub use show::show_config;
pub use tui::{BrowseOptions, run_browse};
