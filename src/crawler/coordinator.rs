//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives a full crawl:
//! - Validating options and building the worker pool
//! - Computing the deadline and allocating fresh shared state
//! - Running one root task per seed URL on the pool and joining them
//! - Reducing the accumulated word counts to the most popular words

use crate::config::Config;
use crate::crawler::clock::{Clock, SystemClock};
use crate::crawler::result::CrawlResult;
use crate::crawler::task::{CrawlTask, TaskContext};
use crate::crawler::top_words::top_words;
use crate::page::PageSource;
use crate::state::CrawlState;
use crate::url::PatternList;
use crate::{ConfigError, CrawlError};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;
use std::time::Duration;

/// Deepest link chain a crawler will follow
///
/// Every link level nests another task on a worker's stack, so the depth is
/// bounded and worker stacks are sized for it.
pub const MAX_CRAWL_DEPTH: u32 = 1000;

/// Stack reserved for fetching and parsing a single page
const BASE_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Stack reserved for each nested link level
const STACK_PER_LEVEL: usize = 16 * 1024;

fn worker_stack_size(max_depth: u32) -> usize {
    BASE_STACK_SIZE + STACK_PER_LEVEL * max_depth as usize
}

/// Returns the host's hardware concurrency
///
/// This is an advisory upper bound: a crawler never runs more workers than
/// this, whatever parallelism it was configured with.
pub fn max_parallelism() -> usize {
    num_cpus::get()
}

/// A crawler that fetches pages in parallel on a work-stealing pool
///
/// The pool is built once and reused by every call to [`ParallelCrawler::crawl`];
/// the visited set and word counts are fresh for each call.
pub struct ParallelCrawler {
    clock: Arc<dyn Clock>,
    source: Arc<dyn PageSource>,
    timeout: chrono::Duration,
    max_depth: u32,
    popular_word_count: usize,
    ignored_urls: PatternList,
    pool: ThreadPool,
}

impl ParallelCrawler {
    /// Starts building a crawler that reads pages from `source`
    pub fn builder(source: Arc<dyn PageSource>) -> CrawlerBuilder {
        CrawlerBuilder::new(source)
    }

    /// Creates a crawler from a loaded configuration
    ///
    /// # Returns
    ///
    /// * `Ok(ParallelCrawler)` - Ready to crawl
    /// * `Err(CrawlError)` - Invalid settings or the pool could not be built
    pub fn from_config(config: &Config, source: Arc<dyn PageSource>) -> Result<Self, CrawlError> {
        Self::builder(source)
            .timeout(Duration::from_secs(config.crawler.timeout_seconds))
            .max_depth(config.crawler.max_depth)
            .parallelism(config.crawler.parallelism)
            .popular_word_count(config.crawler.popular_word_count)
            .ignored_urls(&config.ignored_urls)
            .build()
    }

    /// Number of worker threads in this crawler's pool
    pub fn parallelism(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// See [`max_parallelism`]
    pub fn max_parallelism(&self) -> usize {
        max_parallelism()
    }

    /// Crawls everything reachable from `seeds` within the depth and time limits
    ///
    /// Blocks until every root task and all of its descendants have finished.
    /// Running out of time is not an error: whatever was merged before the
    /// deadline is reported.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResult)` - The most popular words and the number of URLs visited
    /// * `Err(ConfigError)` - A seed was empty; nothing was crawled
    pub fn crawl<S>(&self, seeds: &[S]) -> Result<CrawlResult, ConfigError>
    where
        S: AsRef<str> + Sync,
    {
        if let Some(position) = seeds.iter().position(|seed| seed.as_ref().trim().is_empty()) {
            return Err(ConfigError::Validation(format!("seed URL #{} is empty", position)));
        }

        let span = tracing::info_span!("crawl", seeds = seeds.len());
        let _enter = span.enter();

        let started = self.clock.now();
        let deadline = started
            .checked_add_signed(self.timeout)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let state = CrawlState::new();

        tracing::info!(
            "Starting crawl of {} seed(s): max depth {}, {} worker(s), deadline {}",
            seeds.len(),
            self.max_depth,
            self.parallelism(),
            deadline
        );

        let context = TaskContext {
            deadline,
            span: span.clone(),
            state: &state,
            ignored_urls: &self.ignored_urls,
            clock: self.clock.as_ref(),
            source: self.source.as_ref(),
        };

        self.pool.install(|| {
            seeds.par_iter().for_each(|seed| {
                CrawlTask::root(seed.as_ref(), self.max_depth, &context).run();
            });
        });

        let urls_visited = state.visited_count();
        tracing::info!(
            "Crawl finished: {} URLs visited in {}ms",
            urls_visited,
            (self.clock.now() - started).num_milliseconds()
        );

        if state.has_no_words() {
            return Ok(CrawlResult::new(Vec::new(), urls_visited));
        }

        let popular = top_words(state.into_word_counts(), self.popular_word_count);
        Ok(CrawlResult::new(popular, urls_visited))
    }
}

/// Builder for [`ParallelCrawler`]
///
/// `timeout`, `max_depth`, `parallelism` and `popular_word_count` are
/// required. The clock defaults to the system clock.
pub struct CrawlerBuilder {
    source: Arc<dyn PageSource>,
    clock: Arc<dyn Clock>,
    timeout: Option<Duration>,
    max_depth: Option<u32>,
    parallelism: Option<usize>,
    popular_word_count: Option<usize>,
    ignored_urls: Vec<String>,
}

impl CrawlerBuilder {
    fn new(source: Arc<dyn PageSource>) -> Self {
        Self {
            source,
            clock: Arc::new(SystemClock),
            timeout: None,
            max_depth: None,
            parallelism: None,
            popular_word_count: None,
            ignored_urls: Vec::new(),
        }
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = Some(parallelism);
        self
    }

    pub fn popular_word_count(mut self, count: usize) -> Self {
        self.popular_word_count = Some(count);
        self
    }

    /// Sets the URL exclusion patterns, tested in the given order
    pub fn ignored_urls<S: AsRef<str>>(mut self, patterns: &[S]) -> Self {
        self.ignored_urls = patterns.iter().map(|p| p.as_ref().to_string()).collect();
        self
    }

    /// Validates the settings and builds the worker pool
    pub fn build(self) -> Result<ParallelCrawler, CrawlError> {
        let timeout = self.timeout.ok_or_else(|| missing("timeout"))?;
        let max_depth = self.max_depth.ok_or_else(|| missing("max_depth"))?;
        let parallelism = self.parallelism.ok_or_else(|| missing("parallelism"))?;
        let popular_word_count = self
            .popular_word_count
            .ok_or_else(|| missing("popular_word_count"))?;

        if max_depth > MAX_CRAWL_DEPTH {
            return Err(ConfigError::Validation(format!(
                "max_depth must be <= {}, got {}",
                MAX_CRAWL_DEPTH, max_depth
            ))
            .into());
        }

        if parallelism < 1 {
            return Err(ConfigError::Validation(format!(
                "parallelism must be >= 1, got {}",
                parallelism
            ))
            .into());
        }

        // Durations beyond chrono's range are effectively unbounded
        let timeout = chrono::Duration::from_std(timeout).unwrap_or(chrono::Duration::MAX);
        let ignored_urls = PatternList::new(&self.ignored_urls)?;

        let threads = parallelism.min(max_parallelism());
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|idx| format!("wordcrawl-worker-{}", idx))
            .stack_size(worker_stack_size(max_depth))
            .build()?;

        tracing::debug!(
            "Built crawler pool with {} thread(s) (requested {})",
            threads,
            parallelism
        );

        Ok(ParallelCrawler {
            clock: self.clock,
            source: self.source,
            timeout,
            max_depth,
            popular_word_count,
            ignored_urls,
            pool,
        })
    }
}

fn missing(field: &str) -> ConfigError {
    ConfigError::Validation(format!("{} is required", field))
}
