//! Poller tests with scripted probes

use async_trait::async_trait;
use spindrift::config::PollConfig;
use spindrift::poller::{self, Probe, ProbeError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Probe whose answer depends on the URL: "/up" URLs succeed, everything
/// else fails.
struct ScriptedProbe;

#[async_trait]
impl Probe for ScriptedProbe {
    async fn probe(&self, url: &str) -> Result<String, ProbeError> {
        if url.contains("/up") {
            Ok("200 OK".to_string())
        } else {
            // A request built from an unparseable URL yields a real
            // reqwest::Error without touching the network.
            let source = reqwest::Client::new().get("http://[invalid").build().unwrap_err();
            Err(ProbeError::Http {
                url: url.to_string(),
                source,
            })
        }
    }
}

fn fast_config(urls: Vec<String>) -> PollConfig {
    PollConfig {
        urls,
        num_workers: 2,
        poll_interval_secs: 0,
        status_interval_secs: 1,
        error_backoff_secs: 0,
    }
}

async fn run_briefly(urls: Vec<String>) -> std::collections::HashMap<String, String> {
    let config = fast_config(urls);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        let _ = shutdown_tx.send(true);
    });

    tokio::time::timeout(
        Duration::from_secs(10),
        poller::run(Arc::new(ScriptedProbe), &config, shutdown_rx),
    )
    .await
    .expect("poller did not shut down")
}

#[tokio::test]
async fn records_status_for_every_url() {
    let state = run_briefly(vec![
        "http://one.test/up".to_string(),
        "http://two.test/up".to_string(),
        "http://three.test/up".to_string(),
    ])
    .await;

    assert_eq!(state.len(), 3);
    for status in state.values() {
        assert_eq!(status, "200 OK");
    }
}

#[tokio::test]
async fn failed_probes_record_the_error_string() {
    let state = run_briefly(vec![
        "http://one.test/up".to_string(),
        "http://dead.test/down".to_string(),
    ])
    .await;

    assert_eq!(
        state.get("http://one.test/up").map(String::as_str),
        Some("200 OK")
    );
    let down_status = state.get("http://dead.test/down").expect("status recorded");
    assert!(down_status.contains("http://dead.test/down"));
    assert!(down_status.contains("failed"));
}

#[tokio::test]
async fn shutdown_with_no_urls_still_terminates() {
    let state = run_briefly(Vec::new()).await;
    assert!(state.is_empty());
}

#[tokio::test]
async fn more_workers_than_urls_is_harmless() {
    let mut config = fast_config(vec!["http://solo.test/up".to_string()]);
    config.num_workers = 8;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let _ = shutdown_tx.send(true);
    });

    let state = tokio::time::timeout(
        Duration::from_secs(10),
        poller::run(Arc::new(ScriptedProbe), &config, shutdown_rx),
    )
    .await
    .expect("poller did not shut down");

    assert_eq!(
        state.get("http://solo.test/up").map(String::as_str),
        Some("200 OK")
    );
}
