//! The recursive crawl task
//!
//! One task handles one URL at one depth. It either skips the URL or fetches
//! it, merges its words into the shared state, and forks one child task per
//! outgoing link. A task returns only after every child it forked has
//! returned, so the root tasks returning means the whole crawl is done.

use crate::crawler::clock::Clock;
use crate::page::PageSource;
use crate::state::CrawlState;
use crate::url::PatternList;
use chrono::{DateTime, Utc};
use rayon::prelude::*;

/// Everything a task needs that is shared by the whole crawl
///
/// Built once per crawl and borrowed by every task, so all tasks see the same
/// deadline, state, exclusions, clock, and page source. Each task enters
/// `span`, whichever worker it runs on.
pub struct TaskContext<'a> {
    pub deadline: DateTime<Utc>,
    pub span: tracing::Span,
    pub state: &'a CrawlState,
    pub ignored_urls: &'a PatternList,
    pub clock: &'a dyn Clock,
    pub source: &'a dyn PageSource,
}

/// What a single task did with its URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// No depth left; nothing was touched
    DepthExhausted,
    /// The deadline had passed when the task started
    DeadlinePassed,
    /// The URL matched the exclusion pattern at this index
    Excluded(usize),
    /// Another task had already claimed the URL
    AlreadyVisited,
    /// The URL was claimed but the fetch failed; its subtree is abandoned
    FetchFailed,
    /// The page was merged and this many children were forked and joined
    Crawled { links: usize },
}

/// A single unit of crawl work: one URL at one remaining depth
#[derive(Clone)]
pub struct CrawlTask<'a> {
    url: String,
    remaining_depth: u32,
    context: &'a TaskContext<'a>,
}

impl<'a> CrawlTask<'a> {
    /// Creates a task for a seed URL
    pub fn root(url: impl Into<String>, max_depth: u32, context: &'a TaskContext<'a>) -> Self {
        Self {
            url: url.into(),
            remaining_depth: max_depth,
            context,
        }
    }

    /// Creates the task for a link found on this task's page
    fn child(&self, link: &str) -> Self {
        Self {
            url: link.to_string(),
            remaining_depth: self.remaining_depth.saturating_sub(1),
            context: self.context,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn remaining_depth(&self) -> u32 {
        self.remaining_depth
    }

    /// Runs this task and, recursively, all of its children
    ///
    /// Children run on the current rayon pool; any idle worker may steal them.
    /// The deadline is only checked here, on entry: a fetch that has started
    /// is allowed to finish.
    pub fn run(&self) -> TaskOutcome {
        let context = self.context;
        let _enter = context.span.enter();

        if self.remaining_depth == 0 {
            return TaskOutcome::DepthExhausted;
        }

        if context.clock.now() > context.deadline {
            tracing::debug!("Deadline passed, skipping {}", self.url);
            return TaskOutcome::DeadlinePassed;
        }

        if let Some(index) = context.ignored_urls.first_match(&self.url) {
            tracing::debug!("Skipping excluded URL {} (pattern #{})", self.url, index);
            return TaskOutcome::Excluded(index);
        }

        if !context.state.claim(&self.url) {
            return TaskOutcome::AlreadyVisited;
        }

        let page = match context.source.fetch(&self.url) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", self.url, e);
                return TaskOutcome::FetchFailed;
            }
        };

        context.state.merge_word_counts(&page.word_counts);
        tracing::trace!(
            "Merged {} distinct words from {} (depth left {})",
            page.word_counts.len(),
            self.url,
            self.remaining_depth
        );

        page.links.par_iter().for_each(|link| {
            self.child(link).run();
        });

        TaskOutcome::Crawled {
            links: page.links.len(),
        }
    }
}
