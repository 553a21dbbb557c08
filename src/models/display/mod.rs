//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod common;
mod details;
mod movie;
mod provider;
mod ratings;

pub use details::DetailsView;
pub use movie::{MovieDisplay, StreamingMovieDisplay};
pub use provider::{AvailabilityDisplay, ProviderDisplay};
pub use ratings::RatingsDisplay;
