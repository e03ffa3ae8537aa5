//! Fetcher capability for the crawler
//!
//! The coordinator never talks to the network itself; it is handed a
//! [`Fetcher`] and calls it once per claimed URL. Production crawls use
//! [`HttpFetcher`]; tests and the offline demo use [`StaticFetcher`] with
//! canned results.

use crate::crawler::parser::extract_links;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// A successfully fetched page: its content and the outbound URLs
/// discovered on it.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub content: String,
    pub links: Vec<String>,
}

/// Errors a fetch can fail with
///
/// A fetch failure terminates only the branch that hit it; the coordinator
/// reports it and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("request for {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("content type '{content_type}' for {url} is not HTML")]
    ContentMismatch { url: String, content_type: String },
}

/// Capability to retrieve a URL's content and outbound links
///
/// Implementations must be shareable across the unbounded set of crawl
/// tasks, hence the `Send + Sync` bound.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Fetcher backed by a real HTTP client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher with its own HTTP client
    ///
    /// # Arguments
    ///
    /// * `user_agent` - User agent string sent with every request
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("text/html") {
            return Err(FetchError::ContentMismatch {
                url: url.to_string(),
                content_type,
            });
        }

        // Links are resolved against the final URL so relative hrefs
        // survive redirects.
        let base = response.url().clone();
        let body = response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok(FetchedPage {
            links: extract_links(&body, &base),
            content: body,
        })
    }
}

/// Fetcher returning canned results from a fixed mapping
///
/// Unknown URLs fail with [`FetchError::NotFound`], which makes it handy
/// for exercising the crawler's failure paths.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, FetchedPage>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page and the outbound links it reports.
    pub fn page(mut self, url: &str, content: &str, links: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchedPage {
                content: content.to_string(),
                links: links.iter().map(|l| l.to_string()).collect(),
            },
        );
        self
    }

    /// A small site with a cycle and a dead link, used by the offline
    /// crawl demo.
    pub fn sample_site() -> Self {
        Self::new()
            .page(
                "https://demo.test/",
                "Welcome",
                &["https://demo.test/docs/", "https://demo.test/news/"],
            )
            .page(
                "https://demo.test/docs/",
                "Documentation",
                &[
                    "https://demo.test/",
                    "https://demo.test/docs/api/",
                    "https://demo.test/docs/guide/",
                ],
            )
            .page(
                "https://demo.test/docs/api/",
                "API reference",
                &["https://demo.test/", "https://demo.test/docs/"],
            )
            .page(
                "https://demo.test/docs/guide/",
                "User guide",
                &["https://demo.test/docs/", "https://demo.test/missing/"],
            )
            .page("https://demo.test/news/", "News", &[])
    }

    /// Root URL of [`StaticFetcher::sample_site`].
    pub fn sample_root() -> &'static str {
        "https://demo.test/"
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        match self.pages.get(url) {
            Some(page) => Ok(page.clone()),
            None => Err(FetchError::NotFound {
                url: url.to_string(),
            }),
        }
    }
}
