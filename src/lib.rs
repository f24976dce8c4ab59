//! Wordcrawl: a parallel word-frequency crawler
//!
//! This crate crawls the pages reachable from a set of seed URLs, bounded by a
//! maximum link depth and a wall-clock deadline, and reports the most popular
//! words across every visited page together with the number of pages visited.
//!
//! The crawl engine forks one task per discovered link onto a work-stealing
//! thread pool and joins on all of them before returning.

pub mod config;
pub mod crawler;
pub mod output;
pub mod page;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Wordcrawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Page error: {0}")]
    Page(#[from] PageError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Errors raised while fetching or parsing a single page
#[derive(Debug, Error)]
pub enum PageError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got '{content_type}'")]
    ContentType { url: String, content_type: String },

    #[error("Invalid page URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("No page at {0}")]
    NotFound(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to start HTTP runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Result type alias for Wordcrawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page fetches
pub type PageResult<T> = std::result::Result<T, PageError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{
    top_words, Clock, CrawlResult, CrawlerBuilder, FakeClock, ParallelCrawler, SystemClock,
};
pub use page::{HttpPageSource, PageContent, PageSource, StaticPageSource};
pub use state::CrawlState;
pub use url::PatternList;
