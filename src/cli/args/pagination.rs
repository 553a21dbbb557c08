//! Pagination argument types for CLI commands

use clap::Args;

use crate::client::pagination::MAX_PAGE;

/// Most pages a single command will load.
pub const MAX_PAGES_PER_COMMAND: u32 = 10;

/// Shared pagination arguments for listing commands.
///
/// Flatten this into any command that pages through TMDB results:
/// ```ignore
/// Popular {
///     #[command(flatten)]
///     pages: PageArgs,
/// }
/// ```
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// First page to load (1-indexed)
    #[arg(long, short = 'p', default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=MAX_PAGE as i64))]
    pub page: u32,

    /// Number of consecutive pages to load
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=MAX_PAGES_PER_COMMAND as i64))]
    pub pages: u32,
}

impl Default for PageArgs {
    fn default() -> Self {
        Self { page: 1, pages: 1 }
    }
}

/// Single-page argument for commands that don't fan out.
#[derive(Args, Debug, Clone)]
pub struct SinglePageArg {
    /// Page to load (1-indexed)
    #[arg(long, short = 'p', default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=MAX_PAGE as i64))]
    pub page: u32,
}
