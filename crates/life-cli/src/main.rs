use anyhow::{Context, Result};
use clap::Parser;
use life_core::{EndTimePolicy, PlaceQuery};
use tracing_subscriber::EnvFilter;

use life_cli::commands::util::{load_life, resolve_life_file};
use life_cli::commands::{check, day, export, name, places, render, spans, tagged, total, where_at};
use life_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
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
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let mut config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    if matches!(command, Commands::Total { inclusive: true, .. }) {
        config.end_time_policy = EndTimePolicy::Inclusive;
    }
    tracing::debug!(?config, "loaded configuration");

    let path = resolve_life_file(cli.file.as_deref(), &config)?;
    let (life, report) = load_life(&path, &config)?;

    let mut out = std::io::stdout().lock();
    match command {
        Commands::Check => {
            if !check::run(&mut out, &report)? {
                anyhow::bail!("{} lines skipped", report.issues.len());
            }
        }
        Commands::Places { sorted } => places::run(&mut out, &life, *sorted)?,
        Commands::Where { date, time } => where_at::run(&mut out, &life, date, time)?,
        Commands::Total { place, scope, .. } => {
            total::run(&mut out, &life, place, &PlaceQuery::from(*scope))?;
        }
        Commands::Spans { place, scope, utc } => {
            spans::run(&mut out, &life, place, &PlaceQuery::from(*scope), *utc)?;
        }
        Commands::Tagged {
            label,
            semantics,
            exact,
        } => tagged::run(&mut out, &life, label, *semantics, *exact)?,
        Commands::Name { place, as_of } => name::run(&mut out, &life, place, as_of.as_deref())?,
        Commands::Day {
            date,
            current_names,
            superplaces,
        } => day::run(&mut out, &life, date, *current_names, *superplaces)?,
        Commands::Render => render::run(&mut out, &life)?,
        Commands::Export { compact } => export::run(&mut out, &life, *compact)?,
    }

    Ok(())
}
