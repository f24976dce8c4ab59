//! Shared state for a single crawl invocation
//!
//! Every task of one crawl holds a reference to the same `CrawlState`.
//! Both collections are sharded, so unrelated URLs and words rarely contend.

use dashmap::{DashMap, DashSet};
use std::collections::HashMap;

/// Visited set and word accumulator shared by all tasks of one crawl
#[derive(Debug, Default)]
pub struct CrawlState {
    visited: DashSet<String>,
    word_counts: DashMap<String, u64>,
}

impl CrawlState {
    /// Creates an empty crawl state
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a URL for fetching
    ///
    /// Returns true only for the first caller with a given URL. The final
    /// insert is atomic per shard, so two tasks can never both claim the
    /// same URL.
    pub fn claim(&self, url: &str) -> bool {
        if self.visited.contains(url) {
            // Fast path that avoids allocating the key for already-seen URLs
            return false;
        }
        self.visited.insert(url.to_string())
    }

    /// Returns true if the URL has been claimed
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of URLs claimed so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Adds a page's word counts to the running totals
    ///
    /// Each word is updated under its own shard's write lock, so concurrent
    /// merges never lose an increment and merge order does not matter.
    pub fn merge_word_counts<'a, I>(&self, counts: I)
    where
        I: IntoIterator<Item = (&'a String, &'a u64)>,
    {
        for (word, count) in counts {
            *self.word_counts.entry(word.clone()).or_insert(0) += *count;
        }
    }

    /// Returns the running total for a word
    pub fn word_count(&self, word: &str) -> Option<u64> {
        self.word_counts.get(word).map(|count| *count)
    }

    /// Returns true if no words have been accumulated
    pub fn has_no_words(&self) -> bool {
        self.word_counts.is_empty()
    }

    /// Consumes the state, returning the accumulated counts
    pub fn into_word_counts(self) -> HashMap<String, u64> {
        self.word_counts.into_iter().collect()
    }
}
