//! Spindrift: concurrency patterns, one demo at a time
//!
//! This crate collects three small, self-contained demonstrations of task
//! coordination in async Rust: a depth-bounded concurrent crawler with
//! visited-set deduplication, a channel-based binary tree comparison, and a
//! polling system with a central state monitor.

pub mod config;
pub mod crawler;
pub mod poller;
pub mod treewalk;

use thiserror::Error;

/// Main error type for spindrift operations
#[derive(Debug, Error)]
pub enum SpindriftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Probe error: {0}")]
    Probe(#[from] poller::ProbeError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for spindrift operations
pub type Result<T> = std::result::Result<T, SpindriftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlReport, CrawlSession, Fetcher, StaticFetcher, VisitedSet};
pub use poller::{Probe, StateMonitor};
pub use treewalk::{same_values, Tree};
