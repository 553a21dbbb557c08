//! Global CLI options shared across all commands
//!
//! Consolidates the global flags into a single struct so handler signatures
//! stay small.

use crate::cache::FetchOptions;
use crate::cli::{Cli, OutputFormat};
use crate::config::ConfigOverrides;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// For most options, the precedence is: CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; config file values are merged in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format explicitly requested (flag or `MOVEEZ_FORMAT`)
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.moveez/config.yaml)
    pub config: Option<String>,

    /// Bypass cache and fetch fresh data from the API
    pub no_cache: bool,

    /// Watch region override
    pub region: Option<String>,

    /// TMDB key override
    pub tmdb_key: Option<String>,

    /// OMDb key override
    pub omdb_key: Option<String>,

    /// Custom TMDB host for development/testing
    pub tmdb_host: Option<String>,

    /// Custom OMDb host for development/testing
    pub omdb_host: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            no_cache: cli.no_cache,
            region: cli.region.clone(),
            tmdb_key: cli.tmdb_key.clone(),
            omdb_key: cli.omdb_key.clone(),
            tmdb_host: cli.tmdb_host.clone(),
            omdb_host: cli.omdb_host.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Cache options for every request this invocation makes.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::new().force(self.no_cache)
    }

    /// The flag/env layer of the configuration.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            tmdb_api_key: self.tmdb_key.clone(),
            omdb_api_key: self.omdb_key.clone(),
            region: self.region.clone(),
            tmdb_host: self.tmdb_host.clone(),
            omdb_host: self.omdb_host.clone(),
        }
    }
}
