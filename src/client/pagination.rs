//! Pagination bookkeeping for TMDB list endpoints
//!
//! TMDB pages are 1-indexed and every list response carries `total_pages`.

use serde::{Deserialize, Serialize};

use super::models::MovieSummary;

/// TMDB refuses page numbers above this.
pub const MAX_PAGE: u32 = 500;

fn first_page() -> u32 {
    1
}

/// One page of movie results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviePage {
    #[serde(default = "first_page")]
    pub page: u32,

    #[serde(default)]
    pub results: Vec<MovieSummary>,

    #[serde(default = "first_page")]
    pub total_pages: u32,

    #[serde(default)]
    pub total_results: u64,
}

impl MoviePage {
    pub fn cursor(&self) -> PageCursor {
        PageCursor::new(self.page, self.total_pages)
    }
}

/// Position within a paged listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Last page loaded
    pub page: u32,
    /// Total pages reported by the API (at least 1)
    pub total_pages: u32,
}

impl PageCursor {
    pub fn new(page: u32, total_pages: u32) -> Self {
        Self {
            page: page.max(1),
            total_pages: total_pages.clamp(1, MAX_PAGE),
        }
    }

    /// Whether another page exists after the current one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Page number to load next, if any.
    pub fn next_page(&self) -> Option<u32> {
        self.has_more().then_some(self.page + 1)
    }

    /// Up to `count` page numbers following the current one.
    pub fn remaining_pages(&self, count: u32) -> Vec<u32> {
        let last = self.page.saturating_add(count).min(self.total_pages);
        ((self.page + 1)..=last).collect()
    }

    /// Record that `page` was loaded, taking the newest `total_pages`.
    pub fn advance(&mut self, page: &MoviePage) {
        *self = PageCursor::new(page.page.max(self.page), page.total_pages);
    }
}

/// Accumulates results from consecutive pages of one listing.
#[derive(Debug, Clone, Default)]
pub struct MovieFeed {
    pub movies: Vec<MovieSummary>,
    cursor: Option<PageCursor>,
}

impl MovieFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page. Page 1 replaces whatever was loaded before.
    pub fn push(&mut self, page: MoviePage) {
        match self.cursor.as_mut() {
            Some(cursor) if page.page > 1 => {
                cursor.advance(&page);
                self.movies.extend(page.results);
            }
            _ => {
                self.cursor = Some(page.cursor());
                self.movies = page.results;
            }
        }
    }

    pub fn cursor(&self) -> Option<PageCursor> {
        self.cursor
    }

    /// Page to request next; `Some(1)` before anything was loaded
    pub fn next_page(&self) -> Option<u32> {
        match self.cursor {
            Some(cursor) => cursor.next_page(),
            None => Some(1),
        }
    }
}
