//! CLI argument parsing for remora.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "remora")]
#[command(about = "Search Remmina connection profiles, most used first")]
#[command(version)]
#[command(after_help = "\
Examples:
  remora query office         Profiles matching \"office\"
  remora query ssh infra      Profiles whose description has both words
  remora query --json         Every profile as JSON, ranked by usage
  remora open office-pc       Count a use and start Remmina
  remora usage                Show usage counters
  remora init                 Write a default config file
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ~/.config/remora/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Profiles directory, overriding the config file
    #[arg(long, global = true, value_name = "DIR")]
    pub profiles_dir: Option<PathBuf>,

    /// Usage snapshot, overriding the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub usage_file: Option<PathBuf>,

    /// Enable debug logging (also written to the temp directory)
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List profiles matching the query, most used first
    Query {
        /// Query words; empty lists everything
        terms: Vec<String>,

        /// Maximum number of results (defaults to search.maxResults)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count a use of a profile without opening it
    Select {
        /// Profile file path or id
        profile: String,
    },

    /// Count a use of a profile and open it in Remmina
    Open {
        /// Profile file path or id
        profile: String,
    },

    /// Show usage counters
    Usage {
        /// Print counters as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved config, profiles and usage locations
    Paths,

    /// Create the config and data directories and write a default config
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Query text as the launcher would receive it
#[must_use]
pub fn query_text(terms: &[String]) -> String {
    terms.join(" ")
}
