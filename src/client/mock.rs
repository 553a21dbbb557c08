//! Mock movie API clients for testing
//!
//! Provides mock implementations of [`MovieApi`] and [`RatingsApi`] for unit
//! testing command handlers without making real API calls.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::models::{ExternalIds, MovieDetails, MovieSummary, Provider, ProviderResults, Ratings};
use super::pagination::MoviePage;
use super::{MovieApi, RatingsApi, TrendingWindow};
use crate::cache::FetchOptions;
use crate::error::{ApiError, Result};

/// Mock TMDB client.
///
/// Configure responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockMovieClient::new()
///     .with_listing("popular", vec![page(1, 1, &[550])])
///     .await
///     .failing("trending")
///     .await;
/// ```
#[derive(Default)]
pub struct MockMovieClient {
    /// Pages per listing ("popular", "top_rated", "trending", "search", "discover")
    listings: Arc<Mutex<HashMap<&'static str, Vec<MoviePage>>>>,
    details: Arc<Mutex<HashMap<u64, MovieDetails>>>,
    providers: Arc<Mutex<HashMap<u64, ProviderResults>>>,
    provider_list: Arc<Mutex<Vec<Provider>>>,
    /// Endpoints that always fail
    failing: Arc<Mutex<HashSet<&'static str>>>,
    call_count: Arc<Mutex<CallCounts>>,
    /// Options passed with each call, in call order
    captured_options: Arc<Mutex<Vec<FetchOptions>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub popular: usize,
    pub top_rated: usize,
    pub trending: usize,
    pub search: usize,
    pub movie_details: usize,
    pub external_ids: usize,
    pub movie_providers: usize,
    pub providers_list: usize,
    pub movies_by_provider: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.popular
            + self.top_rated
            + self.trending
            + self.search
            + self.movie_details
            + self.external_ids
            + self.movie_providers
            + self.providers_list
            + self.movies_by_provider
    }
}

/// Build a page of bare movies with the given ids.
pub fn movie_page(page: u32, total_pages: u32, ids: &[u64]) -> MoviePage {
    MoviePage {
        page,
        results: ids
            .iter()
            .map(|id| MovieSummary {
                id: *id,
                title: format!("Movie {}", id),
                release_date: Some("2020-01-01".to_string()),
                overview: None,
                poster_path: None,
                vote_average: Some(7.0),
                vote_count: Some(100),
                popularity: None,
            })
            .collect(),
        total_pages,
        total_results: u64::from(total_pages) * 20,
    }
}

impl MockMovieClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the pages a listing returns (index 0 is page 1).
    pub async fn with_listing(self, listing: &'static str, pages: Vec<MoviePage>) -> Self {
        self.listings.lock().await.insert(listing, pages);
        self
    }

    pub async fn with_details(self, details: MovieDetails) -> Self {
        self.details.lock().await.insert(details.id, details);
        self
    }

    pub async fn with_providers(self, id: u64, results: ProviderResults) -> Self {
        self.providers.lock().await.insert(id, results);
        self
    }

    pub async fn with_provider_list(self, providers: Vec<Provider>) -> Self {
        *self.provider_list.lock().await = providers;
        self
    }

    /// Make every call to `endpoint` fail with a 500.
    pub async fn failing(self, endpoint: &'static str) -> Self {
        self.failing.lock().await.insert(endpoint);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get the options every call was made with.
    pub async fn captured_options(&self) -> Vec<FetchOptions> {
        self.captured_options.lock().await.clone()
    }

    async fn record(&self, endpoint: &'static str, opts: FetchOptions) -> Result<()> {
        self.captured_options.lock().await.push(opts);
        {
            let mut counts = self.call_count.lock().await;
            match endpoint {
                "popular" => counts.popular += 1,
                "top_rated" => counts.top_rated += 1,
                "trending" => counts.trending += 1,
                "search" => counts.search += 1,
                "movie_details" => counts.movie_details += 1,
                "external_ids" => counts.external_ids += 1,
                "movie_providers" => counts.movie_providers += 1,
                "providers_list" => counts.providers_list += 1,
                _ => counts.movies_by_provider += 1,
            }
        }

        if self.failing.lock().await.contains(endpoint) {
            return Err(ApiError::Upstream {
                status: 500,
                message: format!("{} unavailable", endpoint),
            }
            .into());
        }
        Ok(())
    }

    async fn listing_page(&self, listing: &'static str, page: u32) -> MoviePage {
        let listings = self.listings.lock().await;
        let pages = listings.get(listing);
        let total_pages = pages.map(|p| p.len() as u32).unwrap_or(1);

        pages
            .and_then(|p| p.get(page.saturating_sub(1) as usize))
            .cloned()
            .unwrap_or_else(|| movie_page(page, total_pages, &[]))
    }

    fn not_found(id: u64) -> ApiError {
        ApiError::Upstream {
            status: 404,
            message: format!("movie {} not found", id),
        }
    }
}

#[async_trait]
impl MovieApi for MockMovieClient {
    async fn popular(&self, page: u32, opts: FetchOptions) -> Result<MoviePage> {
        self.record("popular", opts).await?;
        Ok(self.listing_page("popular", page).await)
    }

    async fn top_rated(&self, page: u32, opts: FetchOptions) -> Result<MoviePage> {
        self.record("top_rated", opts).await?;
        Ok(self.listing_page("top_rated", page).await)
    }

    async fn trending(&self, _window: TrendingWindow, opts: FetchOptions) -> Result<MoviePage> {
        self.record("trending", opts).await?;
        Ok(self.listing_page("trending", 1).await)
    }

    async fn search(&self, _query: &str, page: u32, opts: FetchOptions) -> Result<MoviePage> {
        self.record("search", opts).await?;
        Ok(self.listing_page("search", page).await)
    }

    async fn movie_details(&self, id: u64, opts: FetchOptions) -> Result<MovieDetails> {
        self.record("movie_details", opts).await?;
        self.details
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(id).into())
    }

    async fn external_ids(&self, id: u64, opts: FetchOptions) -> Result<ExternalIds> {
        self.record("external_ids", opts).await?;
        self.details
            .lock()
            .await
            .get(&id)
            .map(|d| d.external_ids.clone().unwrap_or_default())
            .ok_or_else(|| Self::not_found(id).into())
    }

    async fn movie_providers(&self, id: u64, opts: FetchOptions) -> Result<ProviderResults> {
        self.record("movie_providers", opts).await?;
        Ok(self
            .providers
            .lock()
            .await
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    async fn providers_list(
        &self,
        _region: Option<&str>,
        opts: FetchOptions,
    ) -> Result<Vec<Provider>> {
        self.record("providers_list", opts).await?;
        Ok(self.provider_list.lock().await.clone())
    }

    async fn movies_by_provider(
        &self,
        _provider_id: u64,
        _region: &str,
        page: u32,
        opts: FetchOptions,
    ) -> Result<MoviePage> {
        self.record("movies_by_provider", opts).await?;
        Ok(self.listing_page("discover", page).await)
    }
}

/// Mock OMDb client keyed by lowercased title.
#[derive(Default)]
pub struct MockRatingsClient {
    by_title: Arc<Mutex<HashMap<String, Ratings>>>,
    calls: Arc<Mutex<usize>>,
}

impl MockRatingsClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_ratings(self, title: &str, ratings: Ratings) -> Self {
        self.by_title
            .lock()
            .await
            .insert(title.to_lowercase(), ratings);
        self
    }

    pub async fn calls(&self) -> usize {
        *self.calls.lock().await
    }
}

#[async_trait]
impl RatingsApi for MockRatingsClient {
    async fn fetch_ratings(&self, title: &str, _year: Option<i32>) -> Option<Ratings> {
        *self.calls.lock().await += 1;
        self.by_title.lock().await.get(&title.to_lowercase()).cloned()
    }

    async fn fetch_by_imdb_id(&self, imdb_id: &str) -> Option<Ratings> {
        *self.calls.lock().await += 1;
        self.by_title
            .lock()
            .await
            .values()
            .find(|r| r.imdb_id.as_deref() == Some(imdb_id))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockMovieClient::new();
        let page = mock.popular(1, FetchOptions::new()).await.unwrap();

        assert!(page.results.is_empty());
        assert_eq!(mock.call_counts().await.popular, 1);
    }

    #[tokio::test]
    async fn test_mock_client_with_listing_pages() {
        let mock = MockMovieClient::new()
            .with_listing("popular", vec![movie_page(1, 2, &[1, 2]), movie_page(2, 2, &[3])])
            .await;

        let first = mock.popular(1, FetchOptions::new()).await.unwrap();
        let second = mock.popular(2, FetchOptions::new()).await.unwrap();

        assert_eq!(first.results.len(), 2);
        assert_eq!(second.results[0].id, 3);
        assert_eq!(mock.call_counts().await.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_client_failing_endpoint() {
        let mock = MockMovieClient::new().failing("trending").await;

        assert!(
            mock.trending(TrendingWindow::Week, FetchOptions::new())
                .await
                .is_err()
        );
        assert!(mock.popular(1, FetchOptions::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_client_captures_options() {
        let mock = MockMovieClient::new();
        mock.search("alien", 1, FetchOptions::new().force(true))
            .await
            .unwrap();

        let captured = mock.captured_options().await;
        assert_eq!(captured.len(), 1);
        assert!(captured[0].force);
    }

    #[tokio::test]
    async fn test_mock_ratings_lookup() {
        let mock = MockRatingsClient::new()
            .with_ratings(
                "Heat",
                Ratings {
                    imdb_rating: Some("8.3".to_string()),
                    imdb_id: Some("tt0113277".to_string()),
                    ..Ratings::default()
                },
            )
            .await;

        assert!(mock.fetch_ratings("heat", None).await.is_some());
        assert!(mock.fetch_by_imdb_id("tt0113277").await.is_some());
        assert!(mock.fetch_ratings("Ronin", None).await.is_none());
        assert_eq!(mock.calls().await, 3);
    }
}
