//! Details command
//!
//! The TMDB record and the watch providers are requested side by side, then
//! the OMDb ratings are looked up by the IMDb id the record carries. Only the
//! TMDB record is required; providers and ratings degrade gracefully.

use log::debug;

use crate::cache::FetchOptions;
use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::{MovieApi, MovieDetails, Ratings, RatingsApi};
use crate::error::Result;
use crate::models::DetailsView;
use crate::output::json;

/// Ratings via the movie's IMDb id.
///
/// The id normally arrives with the details payload; the separate
/// external ids lookup is only made when it is missing there.
async fn ratings_by_imdb_id(
    api: &dyn MovieApi,
    ratings: &dyn RatingsApi,
    details: &MovieDetails,
    opts: FetchOptions,
) -> Option<Ratings> {
    let imdb_id = match details.imdb_id() {
        Some(id) => id.to_string(),
        None => match api.external_ids(details.id, opts).await {
            Ok(ids) => ids.imdb_id.filter(|i| !i.is_empty())?,
            Err(err) => {
                debug!("External ids for {} unavailable: {}", details.id, err);
                return None;
            }
        },
    };

    ratings.fetch_by_imdb_id(&imdb_id).await
}

/// Gather everything shown for one movie.
pub async fn load_details(
    api: &dyn MovieApi,
    ratings: &dyn RatingsApi,
    id: u64,
    region: &str,
    opts: FetchOptions,
) -> Result<DetailsView> {
    let (details, providers) = tokio::join!(
        api.movie_details(id, opts),
        api.movie_providers(id, opts),
    );
    let details = details?;

    let mut warnings = Vec::new();
    let providers = match providers {
        Ok(mut by_country) => by_country.remove(region),
        Err(err) => {
            warnings.push(format!("Providers unavailable: {}", err));
            None
        }
    };

    let ratings = match ratings_by_imdb_id(api, ratings, &details, opts).await {
        Some(found) => Some(found),
        None => {
            debug!("Falling back to title lookup for ratings");
            ratings.fetch_ratings(&details.title, details.year()).await
        }
    };

    Ok(DetailsView {
        details,
        region: region.to_string(),
        providers,
        ratings,
        warnings,
    })
}

/// Run the details command
pub async fn run(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let view = load_details(&ctx.tmdb, &ctx.omdb, id, ctx.region(), ctx.fetch).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&view)?),
        OutputFormat::Pretty | OutputFormat::Table => print!("{}", view.format_text()),
    }

    Ok(())
}
