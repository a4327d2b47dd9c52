//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gtr_core::LimiterParams;

/// Report time tracked in git notes.
///
/// Reads the time recorded per file edit and attached to commits, and prints
/// per-project totals, per-commit details or a day/hour timeline as JSON.
#[derive(Debug, Parser)]
#[command(name = "gtr", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Only include projects with this tag (repeatable).
    #[arg(long = "tag", global = true)]
    pub tags: Vec<String>,

    /// With --tag, leave out projects that have no tags.
    #[arg(long, global = true)]
    pub no_untagged: bool,

    /// Abort after this many seconds (overrides the config file).
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List tracked projects.
    Projects,

    /// Show committed time per project.
    Totals(LimitArgs),

    /// Show uncommitted time per project.
    Status,

    /// Show time notes per commit.
    Commits(LimitArgs),

    /// Show committed time per day and hour.
    Timeline(LimitArgs),

    /// Export time data to be further processed.
    Export {
        /// Time data to export.
        #[arg(long, value_enum, default_value_t = ExportData::Status)]
        data: ExportData,

        #[command(flatten)]
        limit: LimitArgs,
    },
}

/// Data sets accepted by `export --data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportData {
    Commits,
    Status,
    Projects,
}

/// Commit limiting options.
///
/// At most one of the date range or the period flags may be given.
#[expect(
    clippy::struct_excessive_bools,
    reason = "one flag per named period"
)]
#[derive(Debug, Clone, Default, Args)]
pub struct LimitArgs {
    /// Only the newest N commits per project (0 = all).
    #[arg(short = 'n', long, default_value_t = 0, allow_negative_numbers = true)]
    pub max_count: i64,

    /// Commits starting from this date (yyyy-mm-dd).
    #[arg(long)]
    pub from_date: Option<String>,

    /// Commits through the end of this date (yyyy-mm-dd).
    #[arg(long)]
    pub to_date: Option<String>,

    /// Commits whose message or author contains this text.
    #[arg(long)]
    pub search: Option<String>,

    /// Commits from today.
    #[arg(long)]
    pub today: bool,

    /// Commits from yesterday.
    #[arg(long)]
    pub yesterday: bool,

    /// Commits from this week (starting Monday).
    #[arg(long)]
    pub this_week: bool,

    /// Commits from last week.
    #[arg(long)]
    pub last_week: bool,

    /// Commits from this month.
    #[arg(long)]
    pub this_month: bool,

    /// Commits from last month.
    #[arg(long)]
    pub last_month: bool,

    /// Commits from this year.
    #[arg(long)]
    pub this_year: bool,

    /// Commits from last year.
    #[arg(long)]
    pub last_year: bool,
}

impl From<&LimitArgs> for LimiterParams {
    fn from(args: &LimitArgs) -> Self {
        Self {
            max_count: args.max_count,
            from_date: args.from_date.clone(),
            to_date: args.to_date.clone(),
            search: args.search.clone(),
            today: args.today,
            yesterday: args.yesterday,
            this_week: args.this_week,
            last_week: args.last_week,
            this_month: args.this_month,
            last_month: args.last_month,
            this_year: args.this_year,
            last_year: args.last_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn period_flags_map_onto_limiter_params() {
        let cli = Cli::parse_from(["gtr", "totals", "--last-week", "-n", "5", "--search", "fix"]);
        let Some(Commands::Totals(limit)) = cli.command else {
            panic!("expected totals");
        };
        let params = LimiterParams::from(&limit);
        assert!(params.last_week);
        assert!(!params.this_week);
        assert_eq!(params.max_count, 5);
        assert_eq!(params.search.as_deref(), Some("fix"));
    }

    #[test]
    fn conflicting_flags_are_left_to_the_limiter() {
        // clap accepts both; CommitLimiter::new rejects the combination
        let cli = Cli::parse_from(["gtr", "commits", "--today", "--from-date", "2024-01-01"]);
        let Some(Commands::Commits(limit)) = cli.command else {
            panic!("expected commits");
        };
        assert!(gtr_core::CommitLimiter::new(&LimiterParams::from(&limit)).is_err());
    }

    #[test]
    fn export_defaults_to_status() {
        let cli = Cli::parse_from(["gtr", "export"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Export {
                data: ExportData::Status,
                ..
            })
        ));
    }
}
