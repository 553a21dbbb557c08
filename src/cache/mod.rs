//! In-process response cache for remote API calls
//!
//! Two pieces live here:
//! - [`FetchCache`] memoizes successful JSON responses keyed by the full request
//!   URL, with per-entry expiry and a forced bypass.
//! - [`PendingRequests`] coalesces concurrent lookups for the same subject into
//!   a single outbound call.
//!
//! Both are created once per session and shared through `Arc`.

pub mod fetch;
pub mod pending;

use std::time::Duration;

/// Cache TTL configuration per data type
///
/// Defaults applied by the TMDB and OMDb clients when the caller does not
/// supply its own `ttl`.
pub struct CacheTtl;

impl CacheTtl {
    // Listings and searches move around during the day
    pub const DEFAULT: Duration = Duration::from_secs(5 * 60); // 5 min

    // Details change less frequently
    pub const DETAILS: Duration = Duration::from_secs(10 * 60); // 10 min

    // Discover results for a provider
    pub const DISCOVER: Duration = Duration::from_secs(60 * 60); // 1 hr

    // Where-to-watch data per movie
    pub const PROVIDERS: Duration = Duration::from_secs(12 * 60 * 60); // 12 hr

    // Effectively static for a session
    pub const PROVIDER_LIST: Duration = Duration::from_secs(24 * 60 * 60); // 24 hr
    pub const EXTERNAL_IDS: Duration = Duration::from_secs(24 * 60 * 60); // 24 hr
    pub const RATINGS: Duration = Duration::from_secs(24 * 60 * 60); // 24 hr
}

/// Per-call cache options.
///
/// `ttl` of `None` means "use the endpoint default"; see [`FetchOptions::or_ttl`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// How long a successful response may be served from cache
    pub ttl: Option<Duration>,

    /// Skip any cached entry and overwrite it with a fresh response
    pub force: bool,
}

impl FetchOptions {
    /// Create options with defaults (no ttl override, no force).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit ttl.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set the force flag.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Fill in `ttl` with an endpoint default if the caller left it unset.
    pub fn or_ttl(self, default: Duration) -> Self {
        Self {
            ttl: Some(self.ttl.unwrap_or(default)),
            force: self.force,
        }
    }
}

pub use fetch::FetchCache;
pub use pending::PendingRequests;
