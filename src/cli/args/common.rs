//! Common CLI types shared across commands

use crate::client::TrendingWindow;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich formatting (global default)
    #[default]
    Pretty,
    /// Table format - one row per movie
    Table,
    /// JSON format - structured for scripts
    Json,
}

impl OutputFormat {
    /// Parse the `preferences.format` config value
    pub fn from_preference(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Trending time window
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum PeriodArg {
    /// Last 24 hours
    #[default]
    Day,
    /// Last 7 days
    Week,
}

impl From<PeriodArg> for TrendingWindow {
    fn from(period: PeriodArg) -> Self {
        match period {
            PeriodArg::Day => TrendingWindow::Day,
            PeriodArg::Week => TrendingWindow::Week,
        }
    }
}
