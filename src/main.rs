//! moveez - terminal movie discovery for TMDB and OMDb

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;

use cli::args::GlobalOptions;
use cli::{Cli, Commands, ProvidersCommands, movies::Listing};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        if let Some(hint) = err.hint() {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }
}

/// `--debug` forces debug output; otherwise `RUST_LOG`, defaulting to warnings.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("moveez", log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("moveez version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Browse { providers, limit } => cli::browse::run(&opts, providers, limit).await,
        Commands::Popular { pages } => cli::movies::list(&opts, Listing::Popular, &pages).await,
        Commands::TopRated { pages } => cli::movies::list(&opts, Listing::TopRated, &pages).await,
        Commands::Trending { period } => cli::movies::trending(&opts, period).await,
        Commands::Search { query, page } => cli::movies::search(&opts, &query, page.page).await,
        Commands::Details { id } => cli::details::run(&opts, id).await,
        Commands::Providers(cmd) => match cmd {
            ProvidersCommands::List => cli::providers::list(&opts).await,
            ProvidersCommands::Movies { provider_id, page } => {
                cli::providers::movies(&opts, provider_id, page.page).await
            }
            ProvidersCommands::For {
                movie_id,
                all_regions,
            } => cli::providers::for_movie(&opts, movie_id, all_regions).await,
        },
        Commands::Ratings { title, year } => cli::ratings::run(&opts, &title, year).await,
        Commands::Completion { shell } => cli::completions::run(shell),
    }
}
