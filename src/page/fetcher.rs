//! HTTP page source
//!
//! This module fetches pages over HTTP and hands the body to the HTML parser:
//! - Building HTTP clients with the configured user agent
//! - GET requests with a per-request timeout
//! - Status and Content-Type classification

use crate::config::UserAgentConfig;
use crate::page::parser::parse_html;
use crate::page::{PageContent, PageSource};
use crate::url::PatternList;
use crate::{PageError, PageResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tokio::runtime::Runtime;
use url::Url;

/// Default timeout for a single page request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Page source that downloads and parses HTML over HTTP
///
/// The crawl engine calls [`PageSource::fetch`] from plain worker threads, so
/// this source owns a small tokio runtime and blocks on each request. It must
/// not be used or dropped from inside another tokio runtime.
pub struct HttpPageSource {
    runtime: Runtime,
    client: Client,
    ignored_words: PatternList,
}

impl HttpPageSource {
    /// Creates an HTTP page source with the default request timeout
    ///
    /// # Arguments
    ///
    /// * `user_agent` - The user agent configuration
    /// * `ignored_words` - Words dropped from every page's counts
    pub fn new(user_agent: &UserAgentConfig, ignored_words: PatternList) -> PageResult<Self> {
        Self::with_timeout(user_agent, ignored_words, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates an HTTP page source with an explicit per-request timeout
    pub fn with_timeout(
        user_agent: &UserAgentConfig,
        ignored_words: PatternList,
        timeout: Duration,
    ) -> PageResult<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("wordcrawl-http")
            .enable_all()
            .build()
            .map_err(PageError::Runtime)?;

        let client = build_http_client(user_agent, timeout).map_err(PageError::Client)?;

        Ok(Self {
            runtime,
            client,
            ignored_words,
        })
    }
}

impl PageSource for HttpPageSource {
    fn fetch(&self, url: &str) -> PageResult<PageContent> {
        let (final_url, body) = self.runtime.block_on(fetch_html(&self.client, url))?;
        Ok(parse_html(&body, &final_url, &self.ignored_words))
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use wordcrawl::config::UserAgentConfig;
/// use wordcrawl::page::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(5)).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns the final URL after redirects and the HTML body
///
/// | Condition | Result |
/// |-----------|--------|
/// | Unparseable URL | `PageError::InvalidUrl` |
/// | Network error / timeout | `PageError::Http` |
/// | Non-2xx status | `PageError::Status` |
/// | Content-Type present and not HTML | `PageError::ContentType` |
async fn fetch_html(client: &Client, url: &str) -> PageResult<(Url, String)> {
    let parsed = Url::parse(url).map_err(|source| PageError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let http_error = |source: reqwest::Error| PageError::Http {
        url: url.to_string(),
        source,
    };

    let response = client.get(parsed).send().await.map_err(http_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(PageError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    // Servers that omit the header are given the benefit of the doubt
    if !content_type.is_empty() && !content_type.contains("html") {
        return Err(PageError::ContentType {
            url: url.to_string(),
            content_type,
        });
    }

    let final_url = response.url().clone();
    let body = response.text().await.map_err(http_error)?;

    Ok((final_url, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url_is_page_error() {
        let source = HttpPageSource::new(&UserAgentConfig::default(), PatternList::default())
            .expect("source");

        let result = source.fetch("not a url");
        assert!(matches!(result, Err(PageError::InvalidUrl { .. })));
    }

    // Network behavior is covered by the wiremock integration tests
}
