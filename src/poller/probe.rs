//! Probe capability for the poller

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors a probe can fail with
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request for {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },
}

/// Capability to check a URL and describe its current status
///
/// A probe failure is not fatal to the poller; the error's display string
/// becomes the recorded status and the resource backs off.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, url: &str) -> Result<String, ProbeError>;
}

/// Probe issuing an HTTP HEAD request and reporting the status line
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, url: &str) -> Result<String, ProbeError> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|source| ProbeError::Http {
                url: url.to_string(),
                source,
            })?;
        Ok(response.status().to_string())
    }
}
