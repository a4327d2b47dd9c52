//! Git time report CLI library.
//!
//! This crate provides the CLI interface over the git-backed report sources.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, ExportData, LimitArgs};
pub use config::Config;
