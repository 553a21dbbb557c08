//! Ratings command

use std::sync::Arc;

use colored::Colorize;

use crate::cache::FetchCache;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::cli::context::resolve_format;
use crate::client::{OmdbClient, Ratings, RatingsApi};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::RatingsDisplay;
use crate::output::{Formattable, json};

/// Look up ratings, rejecting a blank title.
pub async fn lookup(
    ratings: &dyn RatingsApi,
    title: &str,
    year: Option<i32>,
) -> Result<Option<Ratings>> {
    if title.trim().is_empty() {
        return Err(Error::InvalidInput("title required".to_string()));
    }
    Ok(ratings.fetch_ratings(title, year).await)
}

/// Run the ratings command.
///
/// Only needs an OMDb key, so it builds its client without the TMDB checks
/// `CommandContext` performs.
pub async fn run(opts: &GlobalOptions, title: &str, year: Option<i32>) -> Result<()> {
    let mut config = Config::load_at(opts.config_ref())?;
    config.apply(opts.overrides());

    let omdb = OmdbClient::with_host(
        Arc::new(FetchCache::new()?),
        config.omdb_api_key.clone(),
        config.omdb_host.clone(),
    );
    if !omdb.is_configured() {
        return Err(Error::InvalidInput(
            "OMDb API key not set. Run `moveez init` or set MOVEEZ_OMDB_KEY.".to_string(),
        ));
    }

    let found = lookup(&omdb, title, year).await?;
    let format = resolve_format(opts, &config);

    match (found, format) {
        (Some(r), OutputFormat::Json) => println!("{}", json::format_json(&r)?),
        (Some(r), _) => vec![RatingsDisplay::new(title, &r)].print(format)?,
        (None, OutputFormat::Json) => println!("{}", json::format_json(&Option::<Ratings>::None)?),
        (None, _) => println!("{} No ratings found for {:?}", "○".dimmed(), title),
    }

    Ok(())
}
