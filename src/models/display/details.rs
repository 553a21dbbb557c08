//! Movie details view
//!
//! Combines the TMDB record with optional provider and ratings lookups.
//! Either of those may be missing; the reason ends up in `warnings`.

use colored::Colorize;
use serde::Serialize;

use super::common::{DASH, or_dash};
use crate::client::models::{CountryProviders, MovieDetails, Ratings};

const TOP_CAST: usize = 5;

/// Everything `moveez details` shows for one movie.
#[derive(Debug, Clone, Serialize)]
pub struct DetailsView {
    pub details: MovieDetails,

    /// Region the providers are for
    pub region: String,

    /// `None` when the lookup failed or the movie has no offers in `region`
    pub providers: Option<CountryProviders>,

    /// `None` when OMDb is not configured or has no match
    pub ratings: Option<Ratings>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl DetailsView {
    /// Format as multi-section text output
    pub fn format_text(&self) -> String {
        let d = &self.details;
        let mut output = String::new();

        let year = d.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        output.push_str(&format!("{}{}\n", d.title.bold(), year));
        if let Some(tagline) = d.tagline.as_deref().filter(|t| !t.is_empty()) {
            output.push_str(&format!("{}\n", tagline.italic().dimmed()));
        }
        output.push_str("══════════════════════════════════════════════════════\n");

        output.push_str(&format!("ID:        {}\n", d.id));
        let runtime = d
            .runtime
            .filter(|r| *r > 0)
            .map(|r| format!("{}h {}m", r / 60, r % 60))
            .unwrap_or_else(|| DASH.to_string());
        output.push_str(&format!("Runtime:   {}\n", runtime));

        let genres: Vec<&str> = d.genres.iter().map(|g| g.name.as_str()).collect();
        if !genres.is_empty() {
            output.push_str(&format!("Genres:    {}\n", genres.join(", ")));
        }

        let directors = d.directors();
        if !directors.is_empty() {
            output.push_str(&format!("Director:  {}\n", directors.join(", ")));
        }

        let cast: Vec<&str> = d.top_cast(TOP_CAST).iter().map(|m| m.name.as_str()).collect();
        if !cast.is_empty() {
            output.push_str(&format!("Cast:      {}\n", cast.join(", ")));
        }

        if let Some(url) = d.poster_url() {
            output.push_str(&format!("Poster:    {}\n", url.cyan()));
        }

        output.push_str("\nRatings\n");
        output.push_str("────────────────────────────────────────────────────\n");
        let tmdb = d
            .vote_average
            .filter(|v| *v > 0.0)
            .map(|v| format!("{:.1}/10 ({} votes)", v, d.vote_count.unwrap_or(0)))
            .unwrap_or_else(|| DASH.to_string());
        output.push_str(&format!("  TMDB       {}\n", tmdb));
        match &self.ratings {
            Some(r) => {
                output.push_str(&format!(
                    "  IMDb       {} ({} votes)\n",
                    or_dash(r.imdb_rating.as_deref()),
                    or_dash(r.imdb_votes.as_deref())
                ));
                output.push_str(&format!(
                    "  Metascore  {}\n",
                    or_dash(r.metascore.as_deref())
                ));
            }
            None => output.push_str(&format!("  {}\n", "IMDb ratings unavailable".dimmed())),
        }

        output.push_str(&format!("\nWhere to watch ({})\n", self.region));
        output.push_str("────────────────────────────────────────────────────\n");
        match self.providers.as_ref().filter(|p| !p.is_empty()) {
            Some(country) => {
                let line = |label: &str, providers: &[crate::client::models::Provider]| {
                    if providers.is_empty() {
                        return String::new();
                    }
                    let names: Vec<&str> =
                        providers.iter().map(|p| p.provider_name.as_str()).collect();
                    format!("  {:<10} {}\n", label, names.join(", "))
                };
                output.push_str(&line("Stream", &country.flatrate));
                output.push_str(&line("Free", &country.free));
                output.push_str(&line("Ads", &country.ads));
                output.push_str(&line("Rent", &country.rent));
                output.push_str(&line("Buy", &country.buy));
            }
            None => output.push_str("  Not available in this region\n"),
        }

        if let Some(overview) = d.overview.as_deref().filter(|o| !o.is_empty()) {
            output.push_str(&format!("\n{}\n", overview));
        }

        for warning in &self.warnings {
            output.push_str(&format!("\n{} {}", "⚠".yellow(), warning));
        }
        if !self.warnings.is_empty() {
            output.push('\n');
        }

        output
    }
}
