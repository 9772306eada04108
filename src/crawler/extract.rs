//! HTML extraction for fetched pages
//!
//! This module turns a page body into:
//! - The page title (from `<title>`)
//! - The main text, read from the first content container found
//! - `<meta>` name/property pairs
//! - Outgoing links and asset references, resolved to absolute URLs

use crate::url::resolve_link;
use scraper::{ElementRef, Html, Selector};
use std::collections::{BTreeMap, HashSet};
use url::Url;

/// Containers searched, in order, for the main content of a page
const CONTENT_CONTAINERS: &[&str] = &["article", "main", ".documentation", ".content", "body"];

/// Elements whose text is taken whole
const TEXT_ELEMENTS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "code", "pre"];

/// Boilerplate elements never read for text
const SKIPPED_ELEMENTS: &[&str] = &["nav", "footer", "script", "style", "noscript", "template"];

/// Everything extracted from one page body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Main text, one block per line
    pub text: String,

    /// `<meta name|property=... content=...>` pairs
    pub metadata: BTreeMap<String, String>,

    /// Absolute http(s) links from `<a href>` tags, in document order
    pub links: Vec<Url>,

    /// Absolute URLs whose path ends in one of the asset extensions
    pub asset_refs: Vec<Url>,
}

/// Parses HTML content and extracts everything the crawler needs
///
/// Relative references are resolved against `base_url`, which should be the
/// final URL of the response. `asset_types` are extensions with a leading dot
/// and are compared case-insensitively.
///
/// # Example
///
/// ```
/// use curio_crawl::crawler::extract_page;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><p>Hi</p><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = extract_page(html, &base_url, &[]);
/// assert_eq!(page.title.as_deref(), Some("Test"));
/// assert_eq!(page.text, "Hi");
/// assert_eq!(page.links[0].as_str(), "https://example.com/page");
/// ```
pub fn extract_page(html: &str, base_url: &Url, asset_types: &[String]) -> ExtractedPage {
    let document = Html::parse_document(html);

    ExtractedPage {
        title: extract_title(&document),
        text: extract_text(&document),
        metadata: extract_metadata(&document),
        links: extract_links(&document, base_url),
        asset_refs: extract_asset_refs(&document, base_url, asset_types),
    }
}

/// Convenience function for extracting just the links from HTML
pub fn extract_links_simple(html: &str, base_url: &Url) -> Vec<Url> {
    extract_links(&Html::parse_document(html), base_url)
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| collapse_whitespace(element.text()))
        .filter(|s| !s.is_empty())
}

fn extract_text(document: &Html) -> String {
    let container = CONTENT_CONTAINERS.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        document.select(&selector).next()
    });

    let mut blocks = Vec::new();
    if let Some(container) = container {
        collect_text(container, &mut blocks);
    }
    blocks.join("\n")
}

/// Walks the element tree, taking text elements whole and skipping boilerplate
fn collect_text(element: ElementRef<'_>, blocks: &mut Vec<String>) {
    let name = element.value().name();

    if SKIPPED_ELEMENTS.contains(&name) {
        return;
    }

    if TEXT_ELEMENTS.contains(&name) {
        let text = if name == "pre" {
            element.text().collect::<String>().trim().to_string()
        } else {
            collapse_whitespace(element.text())
        };
        if !text.is_empty() {
            blocks.push(text);
        }
        return;
    }

    for child in element.children().filter_map(ElementRef::wrap) {
        collect_text(child, blocks);
    }
}

fn extract_metadata(document: &Html) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();

    if let Ok(meta_selector) = Selector::parse("meta[content]") {
        for element in document.select(&meta_selector) {
            let meta = element.value();
            let key = meta.attr("name").or_else(|| meta.attr("property"));

            if let (Some(key), Some(content)) = (key, meta.attr("content")) {
                let key = key.trim();
                if !key.is_empty() {
                    metadata.insert(key.to_string(), content.trim().to_string());
                }
            }
        }
    }

    metadata
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    if seen.insert(absolute_url.to_string()) {
                        links.push(absolute_url);
                    }
                }
            }
        }
    }

    links
}

fn extract_asset_refs(document: &Html, base_url: &Url, asset_types: &[String]) -> Vec<Url> {
    if asset_types.is_empty() {
        return Vec::new();
    }

    let extensions: Vec<String> = asset_types.iter().map(|e| e.to_lowercase()).collect();
    let mut seen = HashSet::new();
    let mut assets = Vec::new();

    for (css, attr) in [("img[src]", "src"), ("a[href]", "href"), ("link[href]", "href")] {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };

        for element in document.select(&selector) {
            let Some(reference) = element.value().attr(attr) else {
                continue;
            };
            let Some(absolute_url) = resolve_link(reference, base_url) else {
                continue;
            };

            let path = absolute_url.path().to_lowercase();
            if extensions.iter().any(|ext| path.ends_with(ext.as_str()))
                && seen.insert(absolute_url.to_string())
            {
                assets.push(absolute_url);
            }
        }
    }

    assets
}

fn collapse_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
