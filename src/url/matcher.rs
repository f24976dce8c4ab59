use crate::ConfigError;
use regex::Regex;

/// An ordered list of patterns with whole-input matching
///
/// Each pattern must match the entire candidate, not just a substring of it:
/// `https://example\.com/.*` matches `https://example.com/about` but
/// `example` alone matches neither that URL nor `example.com`.
///
/// # Examples
///
/// ```
/// use wordcrawl::url::PatternList;
///
/// let patterns = PatternList::new(&[r"https://example\.com/private/.*".to_string()]).unwrap();
///
/// assert!(patterns.matches_any("https://example.com/private/page"));
/// assert!(!patterns.matches_any("https://example.com/public"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    patterns: Vec<Regex>,
}

impl PatternList {
    /// Compiles every pattern, keeping their order
    ///
    /// # Returns
    ///
    /// * `Ok(PatternList)` - All patterns compiled
    /// * `Err(ConfigError::InvalidPattern)` - The first pattern that failed to compile
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
                    ConfigError::InvalidPattern {
                        pattern: pattern.to_string(),
                        message: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns the index of the first pattern that matches the whole input
    pub fn first_match(&self, candidate: &str) -> Option<usize> {
        self.patterns
            .iter()
            .position(|pattern| pattern.is_match(candidate))
    }

    /// Returns true if any pattern matches the whole input
    pub fn matches_any(&self, candidate: &str) -> bool {
        self.first_match(candidate).is_some()
    }
}
