//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod browse;
pub mod completions;
pub mod context;
pub mod details;
pub mod init;
pub mod movies;
pub mod providers;
pub mod ratings;
pub mod status;

pub use args::{OutputFormat, PageArgs, PeriodArg, SinglePageArg};
pub use context::CommandContext;

/// moveez - browse, search and rate movies from the terminal
#[derive(Parser, Debug)]
#[command(name = "moveez")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "MOVEEZ_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "MOVEEZ_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "MOVEEZ_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from the API
    #[arg(long, global = true, env = "MOVEEZ_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Watch region for provider lookups (e.g. US, GB)
    #[arg(long, global = true, env = "MOVEEZ_REGION", hide_env = true)]
    pub region: Option<String>,

    /// TMDB API key
    #[arg(long, global = true, env = "MOVEEZ_TMDB_KEY", hide_env_values = true)]
    pub tmdb_key: Option<String>,

    /// OMDb API key
    #[arg(long, global = true, env = "MOVEEZ_OMDB_KEY", hide_env_values = true)]
    pub omdb_key: Option<String>,

    /// Custom TMDB host (development/testing)
    #[arg(long, global = true, env = "MOVEEZ_TMDB_HOST", hide = true)]
    pub tmdb_host: Option<String>,

    /// Custom OMDb host (development/testing)
    #[arg(long, global = true, env = "MOVEEZ_OMDB_HOST", hide = true)]
    pub omdb_host: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize moveez configuration
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Trending, top rated and popular movies at a glance
    #[command(after_help = "EXAMPLES:\n  \
            moveez browse                  # Three rows, fetched together\n  \
            moveez browse --providers      # Annotate with streaming services\n  \
            moveez browse --region GB --providers")]
    Browse {
        /// Show where each movie streams in the current region
        #[arg(long)]
        providers: bool,

        /// Movies shown per row
        #[arg(long, short = 'n', default_value_t = 10)]
        limit: usize,
    },

    /// Popular movies
    Popular {
        #[command(flatten)]
        pages: PageArgs,
    },

    /// Top rated movies
    #[command(name = "top-rated")]
    TopRated {
        #[command(flatten)]
        pages: PageArgs,
    },

    /// Trending movies
    Trending {
        /// Time window (day, week)
        #[arg(long, value_enum, default_value = "day")]
        period: PeriodArg,
    },

    /// Search movies by title
    #[command(visible_alias = "s")]
    Search {
        /// Title to search for
        query: String,

        #[command(flatten)]
        page: SinglePageArg,
    },

    /// Movie details with providers and ratings
    #[command(
        visible_alias = "d",
        after_help = "EXAMPLES:\n  \
            moveez details 550\n  \
            moveez details 550 --format json | jq '.data.ratings'"
    )]
    Details {
        /// TMDB movie ID
        id: u64,
    },

    /// Streaming providers
    #[command(subcommand)]
    Providers(ProvidersCommands),

    /// IMDb and Metacritic ratings from OMDb
    Ratings {
        /// Movie title
        title: String,

        /// Release year to disambiguate remakes
        #[arg(long, short = 'y')]
        year: Option<i32>,
    },

    /// Generate shell completions
    #[command(after_help = "\
  bash:   moveez completion bash > /etc/bash_completion.d/moveez
  zsh:    moveez completion zsh > \"${fpath[1]}/_moveez\"
  fish:   moveez completion fish > ~/.config/fish/completions/moveez.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Provider subcommands
#[derive(Subcommand, Debug)]
pub enum ProvidersCommands {
    /// List watch providers available in the region
    #[command(visible_alias = "ls")]
    List,

    /// Movies available on a provider, most popular first
    Movies {
        /// TMDB provider ID (see `moveez providers list`)
        provider_id: u64,

        #[command(flatten)]
        page: SinglePageArg,
    },

    /// Where a movie can be watched
    For {
        /// TMDB movie ID
        movie_id: u64,

        /// Show every country, not just the current region
        #[arg(long)]
        all_regions: bool,
    },
}
