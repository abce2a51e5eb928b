//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// precache - cache-first request handler for revisioned static assets
///
/// Resolves asset URLs against a precache manifest, serves stored responses
/// and falls back to the network on a miss.
#[derive(Parser, Debug)]
#[command(name = "precache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PRECACHE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the cache key for a URL and revision
    Key(KeyArgs),

    /// Show the precache entry a URL resolves to
    Resolve(ResolveArgs),

    /// List manifest entries and their cache keys
    Manifest(ManifestArgs),

    /// Handle requests: serve from cache, optionally fall back to network
    Fetch(FetchArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the key command
#[derive(Parser, Debug)]
pub struct KeyArgs {
    /// Asset URL, absolute or relative to the configured scope
    pub url: String,

    /// Content revision
    #[arg(short, long)]
    pub revision: Option<String>,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Request URL, absolute or relative to the configured scope
    pub url: String,

    /// Manifest file (defaults to precache.manifest from config)
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,
}

/// Arguments for the manifest command
#[derive(Parser, Debug)]
pub struct ManifestArgs {
    /// Manifest file (defaults to precache.manifest from config)
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the fetch command
#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Request URLs, absolute or relative to the configured scope
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Manifest file (defaults to precache.manifest from config)
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Fail on a cache miss instead of fetching from the network
    #[arg(long)]
    pub no_fallback: bool,

    /// Write the response body to a file (single URL only)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., precache.origin)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for list-style commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
