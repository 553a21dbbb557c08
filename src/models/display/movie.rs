//! Movie list display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{DASH, truncate_string};
use crate::client::models::{CountryProviders, MovieSummary};

const TITLE_WIDTH: usize = 40;

fn score(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(v) if v > 0.0 => format!("{:.1}", v),
        _ => DASH.to_string(),
    }
}

fn year(movie: &MovieSummary) -> String {
    movie
        .year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| DASH.to_string())
}

/// Movie display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MovieDisplay {
    /// TMDB movie ID
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "YEAR")]
    pub year: String,

    /// Average TMDB score out of 10
    #[tabled(rename = "SCORE")]
    pub score: String,

    #[tabled(rename = "VOTES")]
    pub votes: u64,

    /// JSON only
    #[tabled(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

impl From<&MovieSummary> for MovieDisplay {
    fn from(movie: &MovieSummary) -> Self {
        Self {
            id: movie.id,
            title: truncate_string(&movie.title, TITLE_WIDTH),
            year: year(movie),
            score: score(movie.vote_average),
            votes: movie.vote_count.unwrap_or(0),
            poster: movie.poster_url(),
        }
    }
}

impl From<MovieSummary> for MovieDisplay {
    fn from(movie: MovieSummary) -> Self {
        MovieDisplay::from(&movie)
    }
}

/// Movie row annotated with where it streams in one region.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct StreamingMovieDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "YEAR")]
    pub year: String,

    #[tabled(rename = "SCORE")]
    pub score: String,

    /// Subscription/free providers, comma separated
    #[tabled(rename = "STREAMING")]
    pub streaming: String,
}

impl StreamingMovieDisplay {
    /// `providers` is `None` when the lookup failed.
    pub fn new(movie: &MovieSummary, providers: Option<&CountryProviders>) -> Self {
        let streaming = match providers {
            None => "?".to_string(),
            Some(country) => {
                let names: Vec<&str> = country
                    .streaming()
                    .map(|p| p.provider_name.as_str())
                    .collect();
                if names.is_empty() {
                    DASH.to_string()
                } else {
                    names.join(", ")
                }
            }
        };

        Self {
            id: movie.id,
            title: truncate_string(&movie.title, TITLE_WIDTH),
            year: year(movie),
            score: score(movie.vote_average),
            streaming,
        }
    }
}
