//! Listing commands: popular, top-rated, trending, search

use colored::Colorize;
use log::debug;

use crate::cache::FetchOptions;
use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat, PageArgs, PeriodArg};
use crate::client::{MovieApi, MovieFeed, MoviePage, fetch_pages};
use crate::error::Result;
use crate::models::MovieDisplay;
use crate::output::Formattable;

/// Follow-up pages requested at the same time
const MAX_CONCURRENT_PAGES: usize = 4;

/// Paged TMDB listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Popular,
    TopRated,
}

impl Listing {
    pub fn label(&self) -> &'static str {
        match self {
            Listing::Popular => "Popular",
            Listing::TopRated => "Top Rated",
        }
    }

    async fn page(&self, api: &dyn MovieApi, page: u32, opts: FetchOptions) -> Result<MoviePage> {
        match self {
            Listing::Popular => api.popular(page, opts).await,
            Listing::TopRated => api.top_rated(page, opts).await,
        }
    }
}

/// Load `pages.pages` consecutive pages starting at `pages.page`.
///
/// The first page tells us `total_pages`; the rest are fetched concurrently
/// and appended in page order.
pub async fn load_listing(
    api: &dyn MovieApi,
    listing: Listing,
    pages: &PageArgs,
    opts: FetchOptions,
) -> Result<MovieFeed> {
    let mut feed = MovieFeed::new();
    let first = listing.page(api, pages.page, opts).await?;
    let remaining = first.cursor().remaining_pages(pages.pages.saturating_sub(1));
    feed.push(first);

    if !remaining.is_empty() {
        debug!("{}: loading pages {:?}", listing.label(), remaining);
        let rest = fetch_pages(
            remaining,
            |page| listing.page(api, page, opts),
            MAX_CONCURRENT_PAGES,
        )
        .await?;
        for page in rest {
            feed.push(page);
        }
    }

    Ok(feed)
}

fn print_feed(feed: &MovieFeed, format: OutputFormat) -> Result<()> {
    let rows: Vec<MovieDisplay> = feed.movies.iter().map(MovieDisplay::from).collect();
    rows.print(format)?;

    if format != OutputFormat::Json
        && let Some(cursor) = feed.cursor()
    {
        let hint = match feed.next_page() {
            Some(next) => format!(
                "Page {} of {} (next: --page {})",
                cursor.page, cursor.total_pages, next
            ),
            None => format!("Page {} of {}", cursor.page, cursor.total_pages),
        };
        eprintln!("{}", hint.dimmed());
    }
    Ok(())
}

/// Run `popular` / `top-rated`
pub async fn list(opts: &GlobalOptions, listing: Listing, pages: &PageArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let feed = load_listing(&ctx.tmdb, listing, pages, ctx.fetch).await?;
    print_feed(&feed, ctx.format)
}

/// Run `trending`
pub async fn trending(opts: &GlobalOptions, period: PeriodArg) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let page = ctx.tmdb.trending(period.into(), ctx.fetch).await?;

    let mut feed = MovieFeed::new();
    feed.push(page);
    print_feed(&feed, ctx.format)
}

/// Run `search`
pub async fn search(opts: &GlobalOptions, query: &str, page: u32) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let results = ctx.tmdb.search(query, page, ctx.fetch).await?;
    debug!("Search {:?}: {} total results", query, results.total_results);

    let mut feed = MovieFeed::new();
    feed.push(results);
    print_feed(&feed, ctx.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{MockMovieClient, movie_page};

    #[tokio::test]
    async fn test_load_listing_single_page() {
        let mock = MockMovieClient::new()
            .with_listing("popular", vec![movie_page(1, 3, &[1, 2])])
            .await;

        let feed = load_listing(&mock, Listing::Popular, &PageArgs::default(), FetchOptions::new())
            .await
            .unwrap();

        assert_eq!(feed.movies.len(), 2);
        assert_eq!(feed.next_page(), Some(2));
        assert_eq!(mock.call_counts().await.popular, 1);
    }

    #[tokio::test]
    async fn test_load_listing_multiple_pages_in_order() {
        let mock = MockMovieClient::new()
            .with_listing(
                "top_rated",
                vec![
                    movie_page(1, 3, &[1]),
                    movie_page(2, 3, &[2]),
                    movie_page(3, 3, &[3]),
                ],
            )
            .await;

        let pages = PageArgs { page: 1, pages: 5 };
        let feed = load_listing(&mock, Listing::TopRated, &pages, FetchOptions::new())
            .await
            .unwrap();

        let ids: Vec<u64> = feed.movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(feed.next_page(), None);
        // Never asks past total_pages
        assert_eq!(mock.call_counts().await.top_rated, 3);
    }

    #[tokio::test]
    async fn test_load_listing_starting_mid_way() {
        let mock = MockMovieClient::new()
            .with_listing(
                "popular",
                vec![
                    movie_page(1, 3, &[1]),
                    movie_page(2, 3, &[2]),
                    movie_page(3, 3, &[3]),
                ],
            )
            .await;

        let pages = PageArgs { page: 2, pages: 2 };
        let feed = load_listing(&mock, Listing::Popular, &pages, FetchOptions::new())
            .await
            .unwrap();

        let ids: Vec<u64> = feed.movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_load_listing_passes_force() {
        let mock = MockMovieClient::new()
            .with_listing("popular", vec![movie_page(1, 2, &[1]), movie_page(2, 2, &[2])])
            .await;

        let pages = PageArgs { page: 1, pages: 2 };
        load_listing(&mock, Listing::Popular, &pages, FetchOptions::new().force(true))
            .await
            .unwrap();

        assert!(mock.captured_options().await.iter().all(|o| o.force));
    }

    #[tokio::test]
    async fn test_load_listing_error_propagates() {
        let mock = MockMovieClient::new().failing("popular").await;
        let result =
            load_listing(&mock, Listing::Popular, &PageArgs::default(), FetchOptions::new()).await;
        assert!(result.is_err());
    }
}
