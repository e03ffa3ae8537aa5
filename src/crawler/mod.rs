//! Depth-bounded concurrent crawler
//!
//! The structurally interesting demo: shared mutable state (the visited
//! set), unbounded task fan-out, and counter-based termination detection,
//! all coordinated per crawl rather than per process. The pieces:
//! - a [`Fetcher`] capability injected by the caller
//! - a [`VisitedSet`] giving each URL to exactly one task
//! - a [`TaskCounter`] that drains to zero exactly when the crawl is done
//! - the coordinator tying them together

mod completion;
mod coordinator;
mod fetcher;
mod parser;
mod visited;

pub use completion::{TaskCounter, TaskGuard};
pub use coordinator::{crawl, CrawlFailure, CrawlReport, CrawlSession, CrawledPage};
pub use fetcher::{FetchError, FetchedPage, Fetcher, HttpFetcher, StaticFetcher};
pub use parser::extract_links;
pub use visited::VisitedSet;
