//! OMDb ratings client
//!
//! Lookups are memoised per title/year (and per IMDb id) for the session.
//! A definite "not found" is memoised as `None`; transport and upstream
//! failures are only logged, so a later lookup may try again.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Url;
use serde::Deserialize;

use super::RatingsApi;
use super::models::Ratings;
use crate::cache::{CacheTtl, FetchCache, FetchOptions};
use crate::error::{ApiError, ApiResult};

/// OMDb API base URL
pub const OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

/// Placeholder OMDb uses for missing values
const NOT_AVAILABLE: &str = "N/A";

/// Title lookup response (`?t=` / `?i=`)
#[derive(Debug, Deserialize)]
struct TitleResponse {
    #[serde(rename = "Response", default)]
    response: String,

    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>,

    #[serde(rename = "imdbVotes", default)]
    imdb_votes: Option<String>,

    #[serde(rename = "Metascore", default)]
    metascore: Option<String>,

    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,

    #[serde(rename = "Error", default)]
    error: Option<String>,
}

/// Search response (`?s=`)
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response", default)]
    response: String,

    #[serde(rename = "Search", default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchHit {
    #[serde(rename = "Title", default)]
    title: String,

    #[serde(rename = "Year", default)]
    year: String,

    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,
}

fn available(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != NOT_AVAILABLE)
}

impl TitleResponse {
    fn into_ratings(self) -> Option<Ratings> {
        if self.response != "True" {
            debug!(
                "OMDb: no match ({})",
                self.error.as_deref().unwrap_or("no error message")
            );
            return None;
        }

        Some(Ratings {
            imdb_rating: available(self.imdb_rating),
            imdb_votes: available(self.imdb_votes),
            metascore: available(self.metascore),
            imdb_id: self.imdb_id.filter(|id| !id.is_empty()),
        })
    }
}

/// Choose the best search hit: the first whose year mentions `year`,
/// otherwise the first hit.
///
/// Series years look like "2010–2015", so containment rather than equality.
fn pick_candidate(hits: &[SearchHit], year: Option<i32>) -> Option<&SearchHit> {
    let by_year = year.and_then(|y| {
        let y = y.to_string();
        hits.iter().find(|hit| hit.year.contains(&y))
    });
    by_year.or_else(|| hits.first())
}

fn memo_key_for_title(title: &str, year: Option<i32>) -> String {
    let year = year.map(|y| y.to_string()).unwrap_or_default();
    format!("{}::{}", title, year).to_lowercase()
}

fn memo_key_for_id(imdb_id: &str) -> String {
    format!("imdb::{}", imdb_id).to_lowercase()
}

/// OMDb client
pub struct OmdbClient {
    cache: Arc<FetchCache>,
    api_key: Option<String>,
    base_url: String,
    memo: Mutex<HashMap<String, Option<Ratings>>>,
}

impl OmdbClient {
    /// Create a client; `host` replaces the public OMDb base URL
    pub fn with_host(cache: Arc<FetchCache>, api_key: Option<String>, host: Option<String>) -> Self {
        Self {
            cache,
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: host.unwrap_or_else(|| OMDB_BASE_URL.to_string()),
            memo: Mutex::new(HashMap::new()),
        }
    }

    /// Whether an API key is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn memo(&self) -> MutexGuard<'_, HashMap<String, Option<Ratings>>> {
        self.memo.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remembered(&self, key: &str) -> Option<Option<Ratings>> {
        let hit = self.memo().get(key).cloned();
        if hit.is_some() {
            debug!("OMDb: memo hit for {}", key);
        }
        hit
    }

    fn remember(&self, key: String, ratings: Option<Ratings>) -> Option<Ratings> {
        self.memo().insert(key, ratings.clone());
        ratings
    }

    fn url(&self, api_key: &str, params: &[(&str, &str)]) -> ApiResult<String> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Network(format!("Invalid OMDb host: {}", e)))?;

        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("apikey", api_key);
        }

        Ok(url.into())
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        api_key: &str,
        params: &[(&str, &str)],
    ) -> ApiResult<T> {
        let url = self.url(api_key, params)?;
        let opts = FetchOptions::new().ttl(CacheTtl::RATINGS);
        self.cache.fetch_json(&url, opts).await
    }

    /// Title lookup, then search fallback. `Ok(None)` means OMDb has no match.
    async fn lookup_title(
        &self,
        api_key: &str,
        title: &str,
        year: Option<i32>,
    ) -> ApiResult<Option<Ratings>> {
        let year_param = year.map(|y| y.to_string());

        let mut params = vec![("t", title)];
        if let Some(y) = year_param.as_deref() {
            params.push(("y", y));
        }
        debug!("OMDb: lookup by title {:?} ({:?})", title, year);
        let direct: TitleResponse = self.get(api_key, &params).await?;
        if let Some(ratings) = direct.into_ratings() {
            return Ok(Some(ratings));
        }

        let mut params = vec![("s", title), ("type", "movie")];
        if let Some(y) = year_param.as_deref() {
            params.push(("y", y));
        }
        debug!("OMDb: search fallback for {:?}", title);
        let search: SearchResponse = self.get(api_key, &params).await?;
        if search.response != "True" {
            return Ok(None);
        }

        let Some(candidate) = pick_candidate(&search.search, year) else {
            return Ok(None);
        };
        let Some(imdb_id) = candidate.imdb_id.as_deref().filter(|id| !id.is_empty()) else {
            return Ok(None);
        };

        debug!(
            "OMDb: selected {} ({}) {}",
            candidate.title, candidate.year, imdb_id
        );
        Ok(self.fetch_by_imdb_id(imdb_id).await)
    }
}

#[async_trait]
impl RatingsApi for OmdbClient {
    async fn fetch_ratings(&self, title: &str, year: Option<i32>) -> Option<Ratings> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let key = memo_key_for_title(title, year);
        if let Some(memoised) = self.remembered(&key) {
            return memoised;
        }
        let Some(api_key) = self.api_key.as_deref() else {
            return self.remember(key, None);
        };

        match self.lookup_title(api_key, title, year).await {
            Ok(ratings) => self.remember(key, ratings),
            Err(err) => {
                warn!("OMDb lookup for {:?} failed: {}", title, err);
                None
            }
        }
    }

    async fn fetch_by_imdb_id(&self, imdb_id: &str) -> Option<Ratings> {
        let imdb_id = imdb_id.trim();
        if imdb_id.is_empty() {
            return None;
        }
        let key = memo_key_for_id(imdb_id);
        if let Some(memoised) = self.remembered(&key) {
            return memoised;
        }
        let Some(api_key) = self.api_key.as_deref() else {
            return self.remember(key, None);
        };

        match self.get::<TitleResponse>(api_key, &[("i", imdb_id)]).await {
            Ok(response) => self.remember(key, response.into_ratings()),
            Err(err) => {
                warn!("OMDb lookup for {} failed: {}", imdb_id, err);
                None
            }
        }
    }
}
