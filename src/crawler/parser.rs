//! Outbound link extraction for the HTTP fetcher

use scraper::{Html, Selector};
use url::Url;

/// Extracts the outbound links from an HTML page as absolute URL strings
///
/// Relative hrefs are resolved against `base`. Fragment-only, `mailto:`,
/// `tel:`, `javascript:`, and `data:` hrefs are skipped, as is anything
/// that resolves to a non-HTTP(S) scheme.
pub fn extract_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_link(href, base) {
                    links.push(absolute);
                }
            }
        }
    }

    links
}

fn resolve_link(href: &str, base: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}
