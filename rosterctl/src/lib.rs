//! Library half of `rosterctl`: configuration, logging and the `list`,
//! `browse` and `config` subcommands.

pub mod cli;
pub mod config;
pub mod logging;
pub mod render;
