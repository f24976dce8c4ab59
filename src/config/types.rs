use serde::Deserialize;

/// Main configuration structure for Wordcrawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Seed URLs the crawl starts from
    #[serde(rename = "start-pages")]
    pub start_pages: Vec<String>,

    /// Regular expressions matched against full URLs; a match skips the page
    #[serde(rename = "ignored-urls", default)]
    pub ignored_urls: Vec<String>,

    /// Regular expressions matched against whole words; a match drops the word
    #[serde(rename = "ignored-words", default)]
    pub ignored_words: Vec<String>,

    pub crawler: CrawlerConfig,

    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum link depth to follow from the seed URLs
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Wall-clock budget for the whole crawl, in seconds
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Desired number of worker threads
    pub parallelism: usize,

    /// Number of most popular words to report
    #[serde(rename = "popular-word-count")]
    pub popular_word_count: usize,
}

/// User agent identification sent with every page request
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// Optional URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version` or `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

fn default_crawler_name() -> String {
    "wordcrawl".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON result file; results go to stdout when absent
    #[serde(rename = "result-path", default)]
    pub result_path: Option<String>,
}
