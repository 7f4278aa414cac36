//! Remora command line front end
//!
//! Supplies query text to the profile index, renders the ranked results and
//! records selections. Opening a profile hands it to the Remmina client.

use anyhow::{Context, Result};
use clap::Parser;
use remora_core::config::{Config, Directories};
use remora_core::{ProfileEntry, Remora};
use std::io::Write;
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;
mod launch;

use cli::{Cli, Commands, query_text};

/// Log to stderr. With `--debug`, also log everything to
/// `$TMPDIR/remora.log`.
///
/// The returned guard flushes the file writer when dropped, so it must live
/// until the command finishes.
fn setup_logging(debug_flag: bool) -> Option<WorkerGuard> {
    let level = if debug_flag { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("remora={level}")));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(debug_flag);

    let (file_layer, guard) = if debug_flag {
        let file_appender = tracing_appender::rolling::never(std::env::temp_dir(), "remora.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

/// Load config and apply command line overrides.
fn load_config(cli: &Cli, dirs: &Directories) -> Result<Config> {
    let config_path = cli.config.as_ref().unwrap_or(&dirs.config_file);
    let mut config = Config::load(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if let Some(dir) = &cli.profiles_dir {
        config.profiles.directory = Some(dir.clone());
    }
    if let Some(path) = &cli.usage_file {
        config.usage_file = Some(path.clone());
    }

    Ok(config)
}

fn open_remora(cli: &Cli) -> Result<Remora> {
    let dirs = Directories::new()?;
    let config = load_config(cli, &dirs)?;
    Remora::new(config, &dirs).context("Cannot search profiles")
}

fn print_entries(entries: &[ProfileEntry], json: bool) -> Result<()> {
    let mut out = std::io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut out, entries)?;
        writeln!(out)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(out, "No matching profiles")?;
        return Ok(());
    }

    for entry in entries {
        writeln!(out, "{}  [{}]  ({} uses)", entry.title, entry.icon, entry.uses)?;
        writeln!(out, "    {}", entry.description)?;
        writeln!(out, "    {}", entry.path.display())?;
    }
    Ok(())
}

fn run_query(remora: &Remora, terms: &[String], limit: Option<usize>, json: bool) -> Result<()> {
    let text = query_text(terms);
    let entries = match limit {
        Some(limit) => remora.query_with_limit(&text, limit),
        None => remora.query(&text),
    };
    print_entries(&entries, json)
}

fn run_select(remora: &mut Remora, profile: &str) -> Result<()> {
    let selection = remora
        .select(profile)
        .with_context(|| format!("Failed to record selection of {profile}"))?;
    println!("{}: {} uses", selection.record.title, selection.uses);
    Ok(())
}

fn run_open(remora: &mut Remora, profile: &str) -> Result<()> {
    let launcher = launch::resolve_launcher(remora.config().launcher.executable.as_deref())?;

    // A failed usage write should not stop the connection from opening
    let record = match remora.select(profile) {
        Ok(selection) => selection.record,
        Err(e @ remora_core::Error::Persist { .. }) => {
            eprintln!("Warning: {e}");
            remora
                .scan()
                .resolve(profile)
                .cloned()
                .with_context(|| format!("Profile not found: {profile}"))?
        }
        Err(e) => return Err(e).with_context(|| format!("Cannot open {profile}")),
    };

    debug!(
        "Opening {} with {}",
        record.path.display(),
        launcher.display()
    );
    launch::spawn(&launcher, &record.path)
}

fn run_usage(remora: &Remora, json: bool) -> Result<()> {
    let entries = remora.usage().entries_by_count();

    if json {
        let map: serde_json::Map<String, serde_json::Value> = entries
            .iter()
            .map(|(id, count)| ((*id).to_string(), serde_json::Value::from(*count)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No usage recorded yet");
        return Ok(());
    }

    for (id, count) in entries {
        println!("{count:>6}  {id}");
    }
    Ok(())
}

fn run_paths(cli: &Cli) -> Result<()> {
    let dirs = Directories::new()?;
    let config_path = cli.config.clone().unwrap_or_else(|| dirs.config_file.clone());
    println!("config:   {}", config_path.display());

    let remora = open_remora(cli)?;
    println!("profiles: {}", remora.profiles_dir().display());
    println!("usage:    {}", remora.usage().path().display());
    Ok(())
}

fn run_init(cli: &Cli, force: bool) -> Result<()> {
    let dirs = Directories::new()?;
    dirs.ensure_exists()
        .context("Failed to create remora directories")?;

    let config_path = cli.config.as_ref().unwrap_or(&dirs.config_file);
    if config_path.exists() && !force {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
        return Ok(());
    }

    Config::default()
        .save(config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    println!("Wrote default config to {}", config_path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = setup_logging(cli.debug);

    match &cli.command {
        Commands::Query { terms, limit, json } => {
            run_query(&open_remora(&cli)?, terms, *limit, *json)
        }
        Commands::Select { profile } => run_select(&mut open_remora(&cli)?, profile),
        Commands::Open { profile } => run_open(&mut open_remora(&cli)?, profile),
        Commands::Usage { json } => run_usage(&open_remora(&cli)?, *json),
        Commands::Paths => run_paths(&cli),
        Commands::Init { force } => run_init(&cli, *force),
    }
}
