//! Page sources: where the crawler gets words and links from
//!
//! The crawl engine only depends on the [`PageSource`] trait. This module
//! provides two implementations:
//! - [`HttpPageSource`] downloads pages over HTTP and parses them as HTML
//! - [`StaticPageSource`] serves a fixed, in-memory page graph

mod fetcher;
mod parser;

pub use fetcher::{build_http_client, HttpPageSource, DEFAULT_REQUEST_TIMEOUT};
pub use parser::{count_words, parse_html};

use crate::{PageError, PageResult};
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};

/// Words and links extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// Occurrences of each word on the page
    pub word_counts: HashMap<String, u64>,

    /// Outgoing links, absolute, in document order
    pub links: Vec<String>,
}

/// A source of page content
///
/// Implementations are called concurrently from many worker threads and may
/// block. A returned error only aborts the crawl of that page's subtree.
pub trait PageSource: Send + Sync {
    /// Fetches a page and extracts its word counts and links
    fn fetch(&self, url: &str) -> PageResult<PageContent>;
}

/// A page source backed by an in-memory page graph
///
/// Unknown URLs fail with [`PageError::NotFound`]. Every call to `fetch` is
/// recorded, which makes this source useful for checking what a crawl touched.
///
/// # Example
///
/// ```
/// use wordcrawl::page::{PageSource, StaticPageSource};
///
/// let source = StaticPageSource::new()
///     .with_page("https://a.test/", &[("x", 1)], &["https://b.test/"])
///     .with_page("https://b.test/", &[("x", 2)], &[]);
///
/// let page = source.fetch("https://a.test/").unwrap();
/// assert_eq!(page.links, vec!["https://b.test/".to_string()]);
/// assert_eq!(source.fetch_count("https://a.test/"), 1);
/// ```
#[derive(Debug, Default)]
pub struct StaticPageSource {
    pages: HashMap<String, PageContent>,
    failing: HashSet<String>,
    fetches: DashMap<String, usize>,
}

impl StaticPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page with the given word counts and links
    pub fn with_page(mut self, url: &str, words: &[(&str, u64)], links: &[&str]) -> Self {
        let content = PageContent {
            word_counts: words
                .iter()
                .map(|(word, count)| (word.to_string(), *count))
                .collect(),
            links: links.iter().map(|link| link.to_string()).collect(),
        };
        self.pages.insert(url.to_string(), content);
        self
    }

    /// Makes every fetch of `url` fail with HTTP 500
    pub fn with_failure(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Number of times `url` has been fetched
    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches.get(url).map(|count| *count).unwrap_or(0)
    }

    /// Total number of fetches across all URLs
    pub fn total_fetches(&self) -> usize {
        self.fetches.iter().map(|entry| *entry.value()).sum()
    }
}

impl PageSource for StaticPageSource {
    fn fetch(&self, url: &str) -> PageResult<PageContent> {
        *self.fetches.entry(url.to_string()).or_insert(0) += 1;

        if self.failing.contains(url) {
            return Err(PageError::Status {
                url: url.to_string(),
                status: 500,
            });
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| PageError::NotFound(url.to_string()))
    }
}
