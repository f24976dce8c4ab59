//! Crawler module: the parallel crawl engine
//!
//! This module contains the core crawling logic, including:
//! - The recursive fork-join crawl task
//! - The orchestrator that owns the worker pool and drives a crawl
//! - Top-N reduction of the accumulated word counts
//! - Injectable time sources for the crawl deadline

mod clock;
mod coordinator;
mod result;
mod task;
mod top_words;

pub use clock::{Clock, FakeClock, SystemClock};
pub use coordinator::{max_parallelism, CrawlerBuilder, ParallelCrawler, MAX_CRAWL_DEPTH};
pub use result::CrawlResult;
pub use task::{CrawlTask, TaskContext, TaskOutcome};
pub use top_words::top_words;

use crate::config::Config;
use crate::page::HttpPageSource;
use crate::url::PatternList;
use crate::CrawlError;
use std::sync::Arc;

/// Runs a complete crawl over HTTP as described by `config`
///
/// This is the main entry point for a configured crawl. It will:
/// 1. Build the HTTP page source with the configured user agent and ignored words
/// 2. Build the crawler and its worker pool
/// 3. Crawl from every start page and return the result
///
/// # Example
///
/// ```no_run
/// use wordcrawl::config::load_config;
/// use wordcrawl::crawler::crawl;
/// use std::path::Path;
///
/// let config = load_config(Path::new("crawl.toml")).unwrap();
/// let result = crawl(&config).unwrap();
/// println!("Visited {} pages", result.urls_visited());
/// ```
pub fn crawl(config: &Config) -> Result<CrawlResult, CrawlError> {
    let ignored_words = PatternList::new(&config.ignored_words)?;
    let source = HttpPageSource::new(&config.user_agent, ignored_words)?;
    let crawler = ParallelCrawler::from_config(config, Arc::new(source))?;

    Ok(crawler.crawl(&config.start_pages)?)
}
