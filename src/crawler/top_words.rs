use std::cmp::Ordering;

/// Selects the `limit` most frequent words
///
/// Entries are ordered by count, highest first. Words with equal counts are
/// ordered alphabetically, so the result never depends on the iteration order
/// of the input map.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use wordcrawl::top_words;
///
/// let counts = HashMap::from([
///     ("b".to_string(), 2),
///     ("a".to_string(), 2),
///     ("c".to_string(), 5),
///     ("d".to_string(), 1),
/// ]);
///
/// assert_eq!(
///     top_words(counts, 3),
///     vec![("c".to_string(), 5), ("a".to_string(), 2), ("b".to_string(), 2)]
/// );
/// ```
pub fn top_words<I>(counts: I, limit: usize) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = (String, u64)>,
{
    if limit == 0 {
        return Vec::new();
    }

    let mut entries: Vec<(String, u64)> = counts.into_iter().collect();

    if entries.len() > limit {
        // Partition around the cut so only the kept prefix is fully sorted
        entries.select_nth_unstable_by(limit - 1, rank);
        entries.truncate(limit);
    }
    entries.sort_unstable_by(rank);

    entries
}

fn rank(a: &(String, u64), b: &(String, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}
