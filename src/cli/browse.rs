//! Browse command: the home screen rows
//!
//! Trending, Top Rated and Popular are fetched together. A row that fails is
//! reported inline; the other rows still render.

use std::collections::BTreeMap;

use colored::Colorize;
use futures::future::join_all;
use log::{debug, warn};
use serde::Serialize;

use crate::cache::FetchOptions;
use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::{CountryProviders, MovieApi, MovieSummary, TrendingWindow};
use crate::error::Result;
use crate::models::{MovieDisplay, StreamingMovieDisplay};
use crate::output::{json, table};

/// One row of the browse screen.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseRow {
    pub row: &'static str,

    /// Why the row could not be loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub movies: Vec<MovieSummary>,

    /// Streaming offers in the region, by movie id. Failed lookups are absent.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub providers: BTreeMap<u64, CountryProviders>,
}

impl BrowseRow {
    fn new(row: &'static str, result: Result<Vec<MovieSummary>>, limit: usize) -> Self {
        match result {
            Ok(mut movies) => {
                movies.truncate(limit);
                Self {
                    row,
                    error: None,
                    movies,
                    providers: BTreeMap::new(),
                }
            }
            Err(err) => {
                warn!("{} row failed: {}", row, err);
                Self {
                    row,
                    error: Some(err.to_string()),
                    movies: Vec::new(),
                    providers: BTreeMap::new(),
                }
            }
        }
    }

    fn format_text(&self, with_providers: bool) -> String {
        if let Some(err) = &self.error {
            return format!("{}\n{} {}\n", self.row.bold(), "✗".red(), err.red());
        }

        if with_providers {
            let rows: Vec<StreamingMovieDisplay> = self
                .movies
                .iter()
                .map(|m| StreamingMovieDisplay::new(m, self.providers.get(&m.id)))
                .collect();
            format!("{}\n", table::format_section(self.row, &rows))
        } else {
            let rows: Vec<MovieDisplay> = self.movies.iter().map(MovieDisplay::from).collect();
            format!("{}\n", table::format_section(self.row, &rows))
        }
    }
}

/// Fetch the three rows concurrently.
pub async fn load_rows(api: &dyn MovieApi, limit: usize, opts: FetchOptions) -> Vec<BrowseRow> {
    let (trending, top_rated, popular) = tokio::join!(
        api.trending(TrendingWindow::default(), opts),
        api.top_rated(1, opts),
        api.popular(1, opts),
    );

    vec![
        BrowseRow::new("Trending", trending.map(|p| p.results), limit),
        BrowseRow::new("Top Rated", top_rated.map(|p| p.results), limit),
        BrowseRow::new("Popular", popular.map(|p| p.results), limit),
    ]
}

/// Look up streaming offers for every movie shown.
///
/// Lookups run concurrently; a title that appears in several rows is
/// requested once by the client. Failures leave the movie unannotated.
pub async fn annotate_providers(
    api: &dyn MovieApi,
    rows: &mut [BrowseRow],
    region: &str,
    opts: FetchOptions,
) {
    let ids: Vec<u64> = rows
        .iter()
        .flat_map(|row| row.movies.iter().map(|m| m.id))
        .collect();
    debug!("Annotating {} movies with providers for {}", ids.len(), region);

    let lookups = ids.iter().map(|id| api.movie_providers(*id, opts));
    let results = join_all(lookups).await;

    let mut found: BTreeMap<u64, CountryProviders> = BTreeMap::new();
    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(mut by_country) => {
                found.insert(*id, by_country.remove(region).unwrap_or_default());
            }
            Err(err) => debug!("Providers for {} unavailable: {}", id, err),
        }
    }

    for row in rows.iter_mut() {
        row.providers = row
            .movies
            .iter()
            .filter_map(|m| found.get(&m.id).map(|p| (m.id, p.clone())))
            .collect();
    }
}

/// Run the browse command
pub async fn run(opts: &GlobalOptions, with_providers: bool, limit: usize) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut rows = load_rows(&ctx.tmdb, limit, ctx.fetch).await;

    if with_providers {
        annotate_providers(&ctx.tmdb, &mut rows, ctx.region(), ctx.fetch).await;
    }

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json_list(&rows)?),
        OutputFormat::Pretty | OutputFormat::Table => {
            for row in &rows {
                println!("{}", row.format_text(with_providers));
            }
        }
    }

    let stats = ctx.cache.stats();
    debug!(
        "Cache after browse: {} fresh, {} expired",
        stats.fresh_entries, stats.expired_entries
    );
    Ok(())
}
