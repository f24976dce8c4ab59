//! HTML parser for extracting words and links
//!
//! This module turns an HTML document into the word counts and outgoing links
//! the crawl engine consumes.

use crate::page::PageContent;
use crate::url::{resolve_link, PatternList};
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashMap;
use url::Url;

/// Elements whose text is never shown to a reader
const NON_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Parses HTML content into word counts and links
///
/// # Word Extraction Rules
///
/// - Only text inside `<body>` is counted; script and style contents are skipped
/// - Text is split on whitespace
/// - Every character other than ASCII letters, digits and `_` is removed from a token
/// - Tokens are lowercased
/// - Empty tokens and tokens fully matching an ignored-word pattern are dropped
///
/// # Link Extraction Rules
///
/// - `<a href="...">` targets, resolved against `base_url`
/// - `<a download>` links are skipped
/// - See [`resolve_link`] for the schemes that are skipped
///
/// # Example
///
/// ```
/// use url::Url;
/// use wordcrawl::page::parse_html;
/// use wordcrawl::url::PatternList;
///
/// let html = r#"<html><body><p>Hello, hello world!</p><a href="/next">next</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = parse_html(html, &base_url, &PatternList::default());
///
/// assert_eq!(page.word_counts["hello"], 2);
/// assert_eq!(page.links, vec!["https://example.com/next".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, ignored_words: &PatternList) -> PageContent {
    let document = Html::parse_document(html);

    PageContent {
        word_counts: count_words(&body_text(&document), ignored_words),
        links: extract_links(&document, base_url),
    }
}

/// Collects the visible text of the document body
fn body_text(document: &Html) -> String {
    let Ok(body_selector) = Selector::parse("body") else {
        return String::new();
    };

    let mut text = String::new();
    for body in document.select(&body_selector) {
        for node in body.descendants() {
            let Node::Text(fragment) = node.value() else {
                continue;
            };

            let hidden = node
                .parent()
                .and_then(ElementRef::wrap)
                .is_some_and(|parent| NON_TEXT_ELEMENTS.contains(&parent.value().name()));
            if hidden {
                continue;
            }

            text.push_str(fragment);
            text.push(' ');
        }
    }

    text
}

/// Counts normalized words in a block of text
pub fn count_words(text: &str, ignored_words: &PatternList) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    for token in text.split_whitespace() {
        let word: String = token
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if word.is_empty() || ignored_words.matches_any(&word) {
            continue;
        }

        *counts.entry(word).or_insert(0) += 1;
    }

    counts
}

/// Extracts all followable links from the HTML document, in document order
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(absolute_url) = element
                .value()
                .attr("href")
                .and_then(|href| resolve_link(href, base_url))
            {
                links.push(absolute_url);
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    fn parse(html: &str) -> PageContent {
        parse_html(html, &base_url(), &PatternList::default())
    }

    #[test]
    fn test_counts_body_words() {
        let page = parse(
            r#"<html><head><title>Ignored Title</title></head>
            <body><h1>The crawler</h1><p>The quick crawler, the end.</p></body></html>"#,
        );

        assert_eq!(page.word_counts.get("the"), Some(&3));
        assert_eq!(page.word_counts.get("crawler"), Some(&2));
        assert_eq!(page.word_counts.get("quick"), Some(&1));
        assert_eq!(page.word_counts.get("end"), Some(&1));
        assert!(!page.word_counts.contains_key("title"));
    }

    #[test]
    fn test_strips_punctuation_and_lowercases() {
        let page = parse(r#"<body>Don't STOP -- snake_case (yes)!</body>"#);

        assert_eq!(page.word_counts.get("dont"), Some(&1));
        assert_eq!(page.word_counts.get("stop"), Some(&1));
        assert_eq!(page.word_counts.get("snake_case"), Some(&1));
        assert_eq!(page.word_counts.get("yes"), Some(&1));
        assert_eq!(page.word_counts.len(), 4);
    }

    #[test]
    fn test_non_ascii_letters_are_stripped() {
        let counts = count_words("café naïve Ünïcode 42", &PatternList::default());

        assert_eq!(counts.get("caf"), Some(&1));
        assert_eq!(counts.get("nave"), Some(&1));
        assert_eq!(counts.get("ncode"), Some(&1));
        assert_eq!(counts.get("42"), Some(&1));
        assert_eq!(counts.len(), 4);
    }

    #[test]
    fn test_skips_script_and_style() {
        let page = parse(
            r#"<body><script>var hidden = 1;</script><style>.x { color: red }</style>shown</body>"#,
        );

        assert_eq!(page.word_counts.len(), 1);
        assert_eq!(page.word_counts.get("shown"), Some(&1));
    }

    #[test]
    fn test_ignored_words() {
        let ignored = PatternList::new(&["^.{1,3}$", "crawler"]).unwrap();
        let page = parse_html(
            "<body>the big crawler crawled everything</body>",
            &base_url(),
            &ignored,
        );

        assert_eq!(page.word_counts.len(), 2);
        assert_eq!(page.word_counts.get("crawled"), Some(&1));
        assert_eq!(page.word_counts.get("everything"), Some(&1));
    }

    #[test]
    fn test_links_in_document_order() {
        let page = parse(
            r#"<body>
                <a href="/page1">Link 1</a>
                <a href="https://other.com/page3">Link 3</a>
                <a href="page2">Link 2</a>
            </body>"#,
        );

        assert_eq!(
            page.links,
            vec![
                "https://example.com/page1",
                "https://other.com/page3",
                "https://example.com/page2",
            ]
        );
    }

    #[test]
    fn test_mixed_valid_and_invalid_links() {
        let page = parse(
            r##"<body>
                <a href="/valid">Valid</a>
                <a href="javascript:alert('no')">Invalid</a>
                <a href="mailto:test@example.com">Invalid</a>
                <a href="#top">Invalid</a>
                <a href="/file.pdf" download>Invalid</a>
                <a href="/another-valid" rel="nofollow">Valid</a>
            </body>"##,
        );

        assert_eq!(page.links.len(), 2);
    }

    #[test]
    fn test_empty_document() {
        let page = parse("");
        assert!(page.word_counts.is_empty());
        assert!(page.links.is_empty());
    }
}
