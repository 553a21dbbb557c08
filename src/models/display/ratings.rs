//! Ratings display model

use serde::Serialize;
use tabled::Tabled;

use super::common::or_dash;
use crate::client::models::Ratings;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RatingsDisplay {
    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "IMDB")]
    pub imdb_rating: String,

    #[tabled(rename = "VOTES")]
    pub imdb_votes: String,

    #[tabled(rename = "METASCORE")]
    pub metascore: String,

    #[tabled(rename = "IMDB ID")]
    pub imdb_id: String,
}

impl RatingsDisplay {
    pub fn new(title: &str, ratings: &Ratings) -> Self {
        Self {
            title: title.to_string(),
            imdb_rating: or_dash(ratings.imdb_rating.as_deref()),
            imdb_votes: or_dash(ratings.imdb_votes.as_deref()),
            metascore: or_dash(ratings.metascore.as_deref()),
            imdb_id: or_dash(ratings.imdb_id.as_deref()),
        }
    }
}
