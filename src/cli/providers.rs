//! Provider commands

use crate::cache::FetchOptions;
use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::{MovieApi, Provider};
use crate::error::Result;
use crate::models::{AvailabilityDisplay, MovieDisplay, ProviderDisplay};
use crate::output::{Formattable, json};

/// Providers for a region, in TMDB's display order. Unranked ones go last.
pub async fn load_providers(
    api: &dyn MovieApi,
    region: &str,
    opts: FetchOptions,
) -> Result<Vec<Provider>> {
    let mut providers = api.providers_list(Some(region), opts).await?;
    providers.sort_by_key(|p| (p.display_priority.unwrap_or(u32::MAX), p.provider_id));
    Ok(providers)
}

/// Run `providers list`
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let providers = load_providers(&ctx.tmdb, ctx.region(), ctx.fetch).await?;

    let rows: Vec<ProviderDisplay> = providers.into_iter().map(ProviderDisplay::from).collect();
    rows.print(ctx.format)
}

/// Run `providers movies <provider-id>`
pub async fn movies(opts: &GlobalOptions, provider_id: u64, page: u32) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let results = ctx
        .tmdb
        .movies_by_provider(provider_id, ctx.region(), page, ctx.fetch)
        .await?;

    let rows: Vec<MovieDisplay> = results.results.iter().map(MovieDisplay::from).collect();
    rows.print(ctx.format)
}

/// Run `providers for <movie-id>`
pub async fn for_movie(opts: &GlobalOptions, movie_id: u64, all_regions: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut results = ctx.tmdb.movie_providers(movie_id, ctx.fetch).await?;

    if !all_regions {
        results.retain(|region, _| region == ctx.region());
    }

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&results)?),
        OutputFormat::Pretty | OutputFormat::Table => {
            let rows = AvailabilityDisplay::for_all(&results);
            if rows.is_empty() {
                println!("Not available to watch in {}.", ctx.region());
            } else {
                rows.print(ctx.format)?;
            }
        }
    }

    Ok(())
}
