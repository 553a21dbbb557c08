//! TMDB API client implementation
//!
//! Every request goes through the shared [`FetchCache`]; the API key travels as
//! the `api_key` query parameter, so it is part of each cache key.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Url;
use serde::Deserialize;

use super::models::{ExternalIds, MovieDetails, Provider, ProviderResults};
use super::pagination::MoviePage;
use super::{MovieApi, TrendingWindow};
use crate::cache::{CacheTtl, FetchCache, FetchOptions, PendingRequests};
use crate::error::{ConfigError, Error, Result};

/// TMDB API base URL
pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default response language
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// TMDB API client
pub struct TmdbClient {
    cache: Arc<FetchCache>,
    providers_pending: PendingRequests<ProviderResults>,
    api_key: Option<String>,
    base_url: String,
    language: String,
}

#[derive(Deserialize)]
struct WatchProvidersResponse {
    #[serde(default)]
    results: ProviderResults,
}

#[derive(Deserialize)]
struct ProviderListResponse {
    #[serde(default)]
    results: Vec<Provider>,
}

fn require_id(id: u64, what: &str) -> Result<()> {
    if id == 0 {
        return Err(Error::InvalidInput(format!("{} required", what)));
    }
    Ok(())
}

impl TmdbClient {
    /// Create a client; `host` replaces the public TMDB API base URL
    pub fn with_host(cache: Arc<FetchCache>, api_key: Option<String>, host: Option<String>) -> Self {
        let base_url = host
            .as_deref()
            .unwrap_or(TMDB_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            cache,
            providers_pending: PendingRequests::new(),
            api_key,
            base_url,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Set the response language (e.g. "de-DE")
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingTmdbKey.into())
    }

    /// Build a fully-parameterised request URL.
    ///
    /// Parameter order is fixed so identical requests map to identical cache keys.
    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let api_key = self.api_key()?;
        let mut url = Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            ConfigError::Invalid(format!("Invalid TMDB host '{}': {}", self.base_url, e))
        })?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", api_key);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        Ok(url.into())
    }

    async fn get_page(&self, url: &str, opts: FetchOptions) -> Result<MoviePage> {
        Ok(self.cache.fetch_json(url, opts).await?)
    }
}

#[async_trait]
impl MovieApi for TmdbClient {
    async fn popular(&self, page: u32, opts: FetchOptions) -> Result<MoviePage> {
        let page = page.to_string();
        let url = self.url(
            "/movie/popular",
            &[("language", &self.language), ("page", &page)],
        )?;
        self.get_page(&url, opts.or_ttl(CacheTtl::DEFAULT)).await
    }

    async fn top_rated(&self, page: u32, opts: FetchOptions) -> Result<MoviePage> {
        let page = page.to_string();
        let url = self.url(
            "/movie/top_rated",
            &[("language", &self.language), ("page", &page)],
        )?;
        self.get_page(&url, opts.or_ttl(CacheTtl::DEFAULT)).await
    }

    async fn trending(&self, window: TrendingWindow, opts: FetchOptions) -> Result<MoviePage> {
        let url = self.url(&format!("/trending/movie/{}", window.as_str()), &[])?;
        self.get_page(&url, opts.or_ttl(CacheTtl::DEFAULT)).await
    }

    async fn search(&self, query: &str, page: u32, opts: FetchOptions) -> Result<MoviePage> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("search query required".to_string()));
        }

        let page = page.to_string();
        let url = self.url(
            "/search/movie",
            &[
                ("language", &self.language),
                ("query", query),
                ("page", &page),
            ],
        )?;
        self.get_page(&url, opts.or_ttl(CacheTtl::DEFAULT)).await
    }

    async fn movie_details(&self, id: u64, opts: FetchOptions) -> Result<MovieDetails> {
        require_id(id, "movie id")?;
        let url = self.url(
            &format!("/movie/{}", id),
            &[
                ("language", &self.language),
                ("append_to_response", "credits,external_ids"),
            ],
        )?;
        Ok(self
            .cache
            .fetch_json(&url, opts.or_ttl(CacheTtl::DETAILS))
            .await?)
    }

    async fn external_ids(&self, id: u64, opts: FetchOptions) -> Result<ExternalIds> {
        require_id(id, "movie id")?;
        let url = self.url(&format!("/movie/{}/external_ids", id), &[])?;
        Ok(self
            .cache
            .fetch_json(&url, opts.or_ttl(CacheTtl::EXTERNAL_IDS))
            .await?)
    }

    async fn movie_providers(&self, id: u64, opts: FetchOptions) -> Result<ProviderResults> {
        require_id(id, "movie id")?;
        let url = self.url(&format!("/movie/{}/watch/providers", id), &[])?;
        let opts = opts.or_ttl(CacheTtl::PROVIDERS);
        let cache = Arc::clone(&self.cache);

        let pending = self
            .providers_pending
            .get_or_start(&id.to_string(), move || async move {
                let response: WatchProvidersResponse = cache.fetch_json(&url, opts).await?;
                Ok(response.results)
            });

        Ok(pending.await?)
    }

    async fn providers_list(
        &self,
        region: Option<&str>,
        opts: FetchOptions,
    ) -> Result<Vec<Provider>> {
        let opts = opts.or_ttl(CacheTtl::PROVIDER_LIST);
        let mut params = vec![("language", self.language.as_str())];
        if let Some(region) = region {
            params.push(("watch_region", region));
        }

        let url = self.url("/watch/providers/movie", &params)?;
        match self
            .cache
            .fetch_json::<ProviderListResponse>(&url, opts)
            .await
        {
            Ok(response) => Ok(response.results),
            Err(err) => {
                warn!("Provider list failed ({}), retrying without language", err);
                params.retain(|(key, _)| *key != "language");
                let fallback = self.url("/watch/providers/movie", &params)?;
                debug!("Provider list fallback request");
                let response: ProviderListResponse = self.cache.fetch_json(&fallback, opts).await?;
                Ok(response.results)
            }
        }
    }

    async fn movies_by_provider(
        &self,
        provider_id: u64,
        region: &str,
        page: u32,
        opts: FetchOptions,
    ) -> Result<MoviePage> {
        require_id(provider_id, "provider id")?;
        let provider = provider_id.to_string();
        let page = page.to_string();
        let url = self.url(
            "/discover/movie",
            &[
                ("with_watch_providers", &provider),
                ("watch_region", region),
                ("sort_by", "popularity.desc"),
                ("page", &page),
            ],
        )?;
        self.get_page(&url, opts.or_ttl(CacheTtl::DISCOVER)).await
    }
}
