use serde::ser::Serializer;
use serde::Serialize;

/// The outcome of one crawl
///
/// Serializes as `{"wordCounts": {...}, "urlsVisited": n}`, with the word
/// counts written in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    #[serde(serialize_with = "serialize_ranked")]
    word_counts: Vec<(String, u64)>,
    urls_visited: usize,
}

impl CrawlResult {
    pub fn new(word_counts: Vec<(String, u64)>, urls_visited: usize) -> Self {
        Self {
            word_counts,
            urls_visited,
        }
    }

    /// The most popular words, highest count first
    pub fn word_counts(&self) -> &[(String, u64)] {
        &self.word_counts
    }

    /// Count reported for `word`, if it made the cut
    pub fn word_count(&self, word: &str) -> Option<u64> {
        self.word_counts
            .iter()
            .find(|(candidate, _)| candidate == word)
            .map(|(_, count)| *count)
    }

    /// Number of distinct URLs claimed during the crawl
    pub fn urls_visited(&self) -> usize {
        self.urls_visited
    }
}

fn serialize_ranked<S>(entries: &[(String, u64)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(entries.iter().map(|(word, count)| (word, count)))
}
