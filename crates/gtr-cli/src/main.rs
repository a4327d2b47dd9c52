use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gtr_cli::commands::util::{ReportOptions, Sources};
use gtr_cli::commands::{commits, export, projects, status, timeline, totals};
use gtr_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support; stdout carries the JSON
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let options = ReportOptions {
        tags: cli.tags.clone(),
        include_untagged: !cli.no_untagged,
        timeout: cli
            .timeout_secs
            .or(config.timeout_secs)
            .map(Duration::from_secs),
    };
    let sources = Sources::from_config(&config);
    let reporter = sources.reporter(&options);
    let now = chrono::Local::now();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match command {
        Commands::Projects => projects::run(&mut out, &reporter, cli.pretty)?,
        Commands::Totals(limit) => totals::run(&mut out, &reporter, limit, &now, cli.pretty)?,
        Commands::Status => status::run(&mut out, &reporter, cli.pretty)?,
        Commands::Commits(limit) => commits::run(&mut out, &reporter, limit, &now, cli.pretty)?,
        Commands::Timeline(limit) => {
            timeline::run(&mut out, &reporter, limit, &now, cli.pretty)?;
        }
        Commands::Export { data, limit } => {
            export::run(&mut out, &reporter, *data, limit, &now, cli.pretty)?;
        }
    }
    out.flush()?;

    Ok(())
}
