//! TTL-bounded response cache for idempotent GET requests
//!
//! Entries are keyed by the fully-qualified request URL (query string included),
//! so two requests that differ only in a parameter never share an entry.
//! Expired entries are dropped lazily, the next time they are looked up.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use log::debug;
use reqwest::{Client as HttpClient, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{CacheTtl, FetchOptions};
use crate::error::{ApiError, ApiResult};

/// Query parameters whose values never appear in log output
const SECRET_PARAMS: &[&str] = &["api_key", "apikey"];

/// Timeout applied by the underlying HTTP transport
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A cached response snapshot.
struct CacheEntry {
    /// `None` when `now + ttl` overflowed; such an entry never expires.
    expires_at: Option<Instant>,
    value: Arc<Value>,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|expires_at| now < expires_at)
    }
}

/// Point-in-time counts for the cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub fresh_entries: usize,
    pub expired_entries: usize,
}

/// Session-scoped cache in front of every remote GET.
///
/// Holds the shared HTTP client. The entry map is guarded by a std mutex that
/// is never held across an `.await`.
pub struct FetchCache {
    http: HttpClient,
    entries: Mutex<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

impl FetchCache {
    /// Create a cache with its own HTTP client and the default TTL.
    pub fn new() -> ApiResult<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("moveez/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self::with_client(http, CacheTtl::DEFAULT))
    }

    /// Create a cache around an existing HTTP client.
    pub fn with_client(http: HttpClient, default_ttl: Duration) -> Self {
        Self {
            http,
            entries: Mutex::new(HashMap::new()),
            default_ttl,
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached value for `target` if it is still fresh.
    ///
    /// A stale entry found here is removed.
    pub fn lookup(&self, target: &str) -> Option<Arc<Value>> {
        let now = Instant::now();
        let mut entries = self.entries();

        match entries.get(target) {
            Some(entry) if entry.is_fresh(now) => Some(Arc::clone(&entry.value)),
            Some(_) => {
                entries.remove(target);
                debug!("Cache expired: {}", redact(target));
                None
            }
            None => None,
        }
    }

    fn store(&self, target: &str, value: Arc<Value>, ttl: Duration) {
        let entry = CacheEntry {
            expires_at: Instant::now().checked_add(ttl),
            value,
        };
        self.entries().insert(target.to_string(), entry);
    }

    /// Fetch `target` as JSON, serving from cache while the entry is fresh.
    ///
    /// With `force` set the cached entry is ignored and replaced on success.
    /// Failures of any kind leave the cache untouched.
    pub async fn fetch(&self, target: &str, options: FetchOptions) -> ApiResult<Arc<Value>> {
        if !options.force {
            if let Some(hit) = self.lookup(target) {
                debug!("Cache hit: {}", redact(target));
                return Ok(hit);
            }
        } else {
            debug!("Cache bypass: {}", redact(target));
        }

        debug!("GET {}", redact(target));
        let response = self
            .http
            .get(target)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let err = upstream_failure(response).await;
            debug!("GET {} failed: {}", redact(target), err);
            return Err(err);
        }

        let bytes = response.bytes().await.map_err(ApiError::from)?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let value = Arc::new(value);
        let ttl = options.ttl.unwrap_or(self.default_ttl);
        self.store(target, Arc::clone(&value), ttl);

        Ok(value)
    }

    /// Fetch `target` and decode the snapshot into `T`.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        target: &str,
        options: FetchOptions,
    ) -> ApiResult<T> {
        let value = self.fetch(target, options).await?;
        T::deserialize(value.as_ref()).map_err(|e| {
            ApiError::InvalidResponse(format!("Unexpected response shape: {}", e))
        })
    }

    /// Drop the entry for `target`. Returns whether one existed.
    #[allow(dead_code)]
    pub fn invalidate(&self, target: &str) -> bool {
        self.entries().remove(target).is_some()
    }

    /// Drop every entry. Returns how many were removed.
    #[allow(dead_code)]
    pub fn clear(&self) -> usize {
        let mut entries = self.entries();
        let removed = entries.len();
        entries.clear();
        removed
    }

    /// Count fresh and expired entries without evicting anything.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let entries = self.entries();
        let fresh_entries = entries.values().filter(|e| e.is_fresh(now)).count();

        CacheStats {
            fresh_entries,
            expired_entries: entries.len() - fresh_entries,
        }
    }
}

/// Error payload shapes returned by the services we talk to
#[derive(Deserialize)]
struct ErrorBody {
    /// TMDB
    #[serde(default)]
    status_message: Option<String>,

    /// OMDb
    #[serde(default, rename = "Error")]
    error: Option<String>,

    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.status_message
            .or(self.error)
            .or(self.message)
            .filter(|m| !m.trim().is_empty())
    }
}

async fn upstream_failure(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let body = match response.bytes().await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            debug!("Could not read error body: {}", e);
            None
        }
    };

    ApiError::Upstream {
        status: status.as_u16(),
        message: describe_failure(status, body.as_deref()),
    }
}

/// Best available human-readable message for a failed response.
///
/// Structured `message` field first, then the raw body text, then the status
/// phrase.
pub(crate) fn describe_failure(status: StatusCode, body: Option<&[u8]>) -> String {
    if let Some(bytes) = body {
        if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(bytes)
            && let Some(message) = parsed.into_message()
        {
            return message;
        }

        if let Ok(text) = std::str::from_utf8(bytes) {
            let text = text.trim();
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}

/// Mask credential query parameters for logging.
pub(crate) fn redact(target: &str) -> String {
    let Ok(mut url) = Url::parse(target) else {
        return target.to_string();
    };

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if SECRET_PARAMS.contains(&k.as_ref()) {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();

    if pairs.is_empty() {
        return url.to_string();
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.to_string()
}
