//! Configuration module for spindrift
//!
//! Handles loading, parsing, and validating TOML configuration files for
//! the crawl and poll demos. Every field has a default, so the demos run
//! without a config file at all.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, PollConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
