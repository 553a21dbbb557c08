//! API response models for TMDB and OMDb

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Base URL for poster images (w500 rendition)
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Movie as it appears in list, search and discover results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID
    pub id: u64,

    #[serde(default)]
    pub title: String,

    /// Release date (YYYY-MM-DD, may be empty)
    #[serde(default)]
    pub release_date: Option<String>,

    #[serde(default)]
    pub overview: Option<String>,

    #[serde(default)]
    pub poster_path: Option<String>,

    /// Average user score out of 10
    #[serde(default)]
    pub vote_average: Option<f64>,

    #[serde(default)]
    pub vote_count: Option<u64>,

    #[serde(default)]
    pub popularity: Option<f64>,
}

impl MovieSummary {
    /// Release year parsed from `release_date`
    pub fn year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }

    /// Full poster URL, if the movie has a poster
    pub fn poster_url(&self) -> Option<String> {
        poster_url(self.poster_path.as_deref())
    }
}

/// Parse the year out of a TMDB date string.
pub fn release_year(date: Option<&str>) -> Option<i32> {
    date.and_then(|d| d.get(..4)).and_then(|y| y.parse().ok())
}

fn poster_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}{}", POSTER_BASE_URL, p))
}

/// Genre tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Cast entry from `credits`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,

    #[serde(default)]
    pub character: Option<String>,

    /// Billing order
    #[serde(default)]
    pub order: Option<u32>,
}

/// Crew entry from `credits`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,

    #[serde(default)]
    pub job: Option<String>,
}

/// Cast and crew appended to the details response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,

    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// Identifiers in other databases
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalIds {
    #[serde(default)]
    pub imdb_id: Option<String>,

    #[serde(default)]
    pub wikidata_id: Option<String>,
}

/// Full movie record from `/movie/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub tagline: Option<String>,

    #[serde(default)]
    pub overview: Option<String>,

    #[serde(default)]
    pub release_date: Option<String>,

    /// Runtime in minutes
    #[serde(default)]
    pub runtime: Option<u32>,

    #[serde(default)]
    pub genres: Vec<Genre>,

    #[serde(default)]
    pub vote_average: Option<f64>,

    #[serde(default)]
    pub vote_count: Option<u64>,

    #[serde(default)]
    pub poster_path: Option<String>,

    #[serde(default)]
    pub imdb_id: Option<String>,

    #[serde(default)]
    pub credits: Option<Credits>,

    #[serde(default)]
    pub external_ids: Option<ExternalIds>,
}

impl MovieDetails {
    pub fn year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }

    pub fn poster_url(&self) -> Option<String> {
        poster_url(self.poster_path.as_deref())
    }

    /// IMDb id from the appended external ids, falling back to the top-level field
    pub fn imdb_id(&self) -> Option<&str> {
        self.external_ids
            .as_ref()
            .and_then(|ids| ids.imdb_id.as_deref())
            .or(self.imdb_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Names of crew members credited as director
    pub fn directors(&self) -> Vec<&str> {
        self.credits
            .iter()
            .flat_map(|c| c.crew.iter())
            .filter(|m| m.job.as_deref() == Some("Director"))
            .map(|m| m.name.as_str())
            .collect()
    }

    /// First `n` cast members in billing order
    pub fn top_cast(&self, n: usize) -> Vec<&CastMember> {
        let mut cast: Vec<&CastMember> = self.credits.iter().flat_map(|c| c.cast.iter()).collect();
        cast.sort_by_key(|m| m.order.unwrap_or(u32::MAX));
        cast.truncate(n);
        cast
    }
}

/// A streaming/rental provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub provider_id: u64,

    pub provider_name: String,

    #[serde(default)]
    pub logo_path: Option<String>,

    #[serde(default)]
    pub display_priority: Option<u32>,
}

/// Where a movie can be watched in one country
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryProviders {
    /// TMDB watch page for the country
    #[serde(default)]
    pub link: Option<String>,

    #[serde(default)]
    pub flatrate: Vec<Provider>,

    #[serde(default)]
    pub free: Vec<Provider>,

    #[serde(default)]
    pub ads: Vec<Provider>,

    #[serde(default)]
    pub rent: Vec<Provider>,

    #[serde(default)]
    pub buy: Vec<Provider>,
}

impl CountryProviders {
    /// Providers that include the movie in a subscription or for free
    pub fn streaming(&self) -> impl Iterator<Item = &Provider> {
        self.flatrate
            .iter()
            .chain(self.free.iter())
            .chain(self.ads.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.flatrate.is_empty()
            && self.free.is_empty()
            && self.ads.is_empty()
            && self.rent.is_empty()
            && self.buy.is_empty()
    }
}

/// Watch providers keyed by ISO 3166-1 country code
pub type ProviderResults = BTreeMap<String, CountryProviders>;

/// Ratings gathered from OMDb
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    /// IMDb user rating, e.g. "8.3"
    pub imdb_rating: Option<String>,

    /// IMDb vote count, e.g. "1,234,567"
    pub imdb_votes: Option<String>,

    /// Metacritic score, e.g. "74"
    pub metascore: Option<String>,

    pub imdb_id: Option<String>,
}
