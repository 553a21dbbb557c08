//! Movie API clients (TMDB for catalogue data, OMDb for ratings)

use async_trait::async_trait;

use crate::cache::FetchOptions;
use crate::error::Result;

#[cfg(test)]
pub mod mock;
pub mod models;
pub mod omdb;
pub mod pagination;
pub mod parallel;
pub mod tmdb;

#[cfg(test)]
#[allow(unused_imports)]
pub use mock::{MockMovieClient, MockRatingsClient};
pub use models::{
    CountryProviders, ExternalIds, MovieDetails, MovieSummary, Provider, ProviderResults, Ratings,
};
pub use omdb::OmdbClient;
pub use pagination::{MovieFeed, MoviePage};
pub use parallel::fetch_pages;
pub use tmdb::TmdbClient;

/// Time window for trending listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrendingWindow {
    #[default]
    Day,
    Week,
}

impl TrendingWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendingWindow::Day => "day",
            TrendingWindow::Week => "week",
        }
    }
}

/// Catalogue operations backed by TMDB
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Popular movies, one page
    async fn popular(&self, page: u32, opts: FetchOptions) -> Result<MoviePage>;

    /// Top rated movies, one page
    async fn top_rated(&self, page: u32, opts: FetchOptions) -> Result<MoviePage>;

    /// Trending movies for the given window
    async fn trending(&self, window: TrendingWindow, opts: FetchOptions) -> Result<MoviePage>;

    /// Free-text title search
    async fn search(&self, query: &str, page: u32, opts: FetchOptions) -> Result<MoviePage>;

    /// Full details with credits and external ids appended
    async fn movie_details(&self, id: u64, opts: FetchOptions) -> Result<MovieDetails>;

    /// IMDb / Wikidata identifiers
    async fn external_ids(&self, id: u64, opts: FetchOptions) -> Result<ExternalIds>;

    /// Where to watch, keyed by country.
    ///
    /// Concurrent calls for the same movie share one outbound request.
    async fn movie_providers(&self, id: u64, opts: FetchOptions) -> Result<ProviderResults>;

    /// All known watch providers, optionally for one region
    async fn providers_list(&self, region: Option<&str>, opts: FetchOptions)
    -> Result<Vec<Provider>>;

    /// Movies available on a provider in a region, most popular first
    async fn movies_by_provider(
        &self,
        provider_id: u64,
        region: &str,
        page: u32,
        opts: FetchOptions,
    ) -> Result<MoviePage>;
}

/// Ratings lookups backed by OMDb.
///
/// Lookups never fail: anything that goes wrong is logged and reported as
/// "no ratings".
#[async_trait]
pub trait RatingsApi: Send + Sync {
    /// Ratings for a title, optionally narrowed by release year
    async fn fetch_ratings(&self, title: &str, year: Option<i32>) -> Option<Ratings>;

    /// Ratings for an exact IMDb id
    async fn fetch_by_imdb_id(&self, imdb_id: &str) -> Option<Ratings>;
}
