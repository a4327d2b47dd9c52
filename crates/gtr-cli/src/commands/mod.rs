//! CLI subcommand implementations.

pub mod commits;
pub mod export;
pub mod projects;
pub mod status;
pub mod timeline;
pub mod totals;
pub mod util;
