//! Human-readable crawl summaries

use crate::crawler::CrawlResult;
use std::fmt::Write;

/// Formats the result as a plain-text table
///
/// # Example
///
/// ```
/// use wordcrawl::crawler::CrawlResult;
/// use wordcrawl::output::format_summary;
///
/// let result = CrawlResult::new(vec![("rust".to_string(), 12)], 4);
/// let summary = format_summary(&result);
/// assert!(summary.contains("Pages visited: 4"));
/// assert!(summary.contains("rust"));
/// ```
pub fn format_summary(result: &CrawlResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Crawl Summary ===\n");
    let _ = writeln!(out, "Pages visited: {}", result.urls_visited());

    if result.word_counts().is_empty() {
        let _ = writeln!(out, "No words collected");
        return out;
    }

    let width = result
        .word_counts()
        .iter()
        .map(|(word, _)| word.chars().count())
        .max()
        .unwrap_or(0);
    let total: u64 = result.word_counts().iter().map(|(_, count)| count).sum();

    let _ = writeln!(out, "\nPopular words:");
    for (rank, (word, count)) in result.word_counts().iter().enumerate() {
        let percentage = (*count as f64 / total as f64) * 100.0;
        let _ = writeln!(
            out,
            "  {:>3}. {:<width$}  {} ({:.1}%)",
            rank + 1,
            word,
            count,
            percentage,
            width = width
        );
    }

    out
}

/// Prints the summary to stdout
pub fn print_summary(result: &CrawlResult) {
    print!("{}", format_summary(result));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_words_in_rank_order() {
        let result = CrawlResult::new(
            vec![("alpha".to_string(), 3), ("be".to_string(), 1)],
            2,
        );
        let summary = format_summary(&result);

        let alpha = summary.find("1. alpha").unwrap();
        let be = summary.find("2. be   ").unwrap();
        assert!(alpha < be);
        assert!(summary.contains("(75.0%)"));
    }

    #[test]
    fn test_summary_without_words() {
        let summary = format_summary(&CrawlResult::default());
        assert!(summary.contains("Pages visited: 0"));
        assert!(summary.contains("No words collected"));
    }
}
