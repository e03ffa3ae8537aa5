use serde::Deserialize;

/// Main configuration structure for spindrift
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub poll: PollConfig,
}

/// Crawler demo configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// URL the crawl starts from
    #[serde(rename = "root-url", default = "default_root_url")]
    pub root_url: String,

    /// Maximum recursion depth from the root URL
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// User agent sent with live HTTP fetches
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
            max_depth: default_max_depth(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_root_url() -> String {
    "https://example.org/".to_string()
}

fn default_max_depth() -> u32 {
    4
}

fn default_user_agent() -> String {
    format!("spindrift/{}", env!("CARGO_PKG_VERSION"))
}

/// Poller demo configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// URLs to poll
    #[serde(default)]
    pub urls: Vec<String>,

    /// Number of concurrent poller workers
    #[serde(rename = "num-workers", default = "default_num_workers")]
    pub num_workers: usize,

    /// Seconds between polls of the same URL
    #[serde(rename = "poll-interval-secs", default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Seconds between state report log lines
    #[serde(rename = "status-interval-secs", default = "default_status_interval")]
    pub status_interval_secs: u64,

    /// Extra back-off seconds added per consecutive error
    #[serde(rename = "error-backoff-secs", default = "default_error_backoff")]
    pub error_backoff_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            num_workers: default_num_workers(),
            poll_interval_secs: default_poll_interval(),
            status_interval_secs: default_status_interval(),
            error_backoff_secs: default_error_backoff(),
        }
    }
}

fn default_num_workers() -> usize {
    2
}

fn default_poll_interval() -> u64 {
    60
}

fn default_status_interval() -> u64 {
    10
}

fn default_error_backoff() -> u64 {
    10
}
