use crate::poller::probe::Probe;
use std::time::Duration;

/// A URL being polled, with its consecutive-error count
#[derive(Debug)]
pub struct Resource {
    url: String,
    err_count: u32,
}

impl Resource {
    pub fn new(url: String) -> Self {
        Self { url, err_count: 0 }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Probes the resource once and returns the status to record
    ///
    /// A successful probe resets the error count; a failed one increments
    /// it and the error's display string becomes the status.
    pub async fn poll<P: Probe + ?Sized>(&mut self, probe: &P) -> String {
        match probe.probe(&self.url).await {
            Ok(status) => {
                self.err_count = 0;
                status
            }
            Err(error) => {
                tracing::error!("poll error for {}: {}", self.url, error);
                self.err_count += 1;
                error.to_string()
            }
        }
    }

    /// How long to wait before this resource is polled again; grows with
    /// each consecutive error.
    pub fn backoff(&self, poll_interval: Duration, error_backoff: Duration) -> Duration {
        poll_interval + error_backoff * self.err_count
    }
}
