//! Command execution context
//!
//! Loads configuration once and builds the session-scoped cache and API
//! clients every catalogue command needs.

use std::sync::Arc;

use log::debug;

use crate::cache::{FetchCache, FetchOptions};
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{OmdbClient, TmdbClient};
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config, clients, and runtime options.
pub struct CommandContext {
    /// Merged configuration (file + env + flags)
    pub config: Config,
    /// Response cache shared by both clients
    pub cache: Arc<FetchCache>,
    /// TMDB catalogue client
    pub tmdb: TmdbClient,
    /// OMDb ratings client
    pub omdb: OmdbClient,
    /// Output format preference
    pub format: OutputFormat,
    /// Cache options applied to every request
    pub fetch: FetchOptions,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Fails if the config file cannot be parsed or no TMDB key is available
    /// from any source.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_at(opts.config_ref())?;
        config.apply(opts.overrides());
        config.validate()?;
        config.require_tmdb_key()?;

        let format = resolve_format(opts, &config);
        let cache = Arc::new(FetchCache::new()?);

        let tmdb = TmdbClient::with_host(
            Arc::clone(&cache),
            config.tmdb_api_key.clone(),
            config.tmdb_host.clone(),
        )
        .language(config.language.clone());

        let omdb = OmdbClient::with_host(
            Arc::clone(&cache),
            config.omdb_api_key.clone(),
            config.omdb_host.clone(),
        );

        debug!(
            "Context ready: region={}, format={:?}, no_cache={}",
            config.region, format, opts.no_cache
        );

        Ok(Self {
            config,
            cache,
            tmdb,
            omdb,
            format,
            fetch: opts.fetch_options(),
        })
    }

    /// Watch region for provider lookups
    pub fn region(&self) -> &str {
        &self.config.region
    }
}

/// Flag/env format wins, then the config preference, then the default.
pub(crate) fn resolve_format(opts: &GlobalOptions, config: &Config) -> OutputFormat {
    opts.format
        .or_else(|| {
            config
                .preferences
                .format
                .as_deref()
                .and_then(OutputFormat::from_preference)
        })
        .unwrap_or_default()
}
