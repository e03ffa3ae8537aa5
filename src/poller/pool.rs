//! Worker pool and re-queue loop
//!
//! Resources circulate: pending queue → worker poll → status update +
//! completion queue → back-off sleep → pending queue again. Workers stop
//! when the shutdown flag flips; everything downstream then drains on its
//! own because each stage exits when its input channel closes.

use crate::config::PollConfig;
use crate::poller::monitor::{PollStatus, StateMonitor};
use crate::poller::probe::Probe;
use crate::poller::resource::Resource;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, Mutex};

/// Polls the configured URLs until `shutdown` flips to true
///
/// # Arguments
///
/// * `probe` - Capability used to check each URL
/// * `config` - URLs, worker count, and intervals
/// * `shutdown` - Flag observed by every stage; flip it to wind down
///
/// # Returns
///
/// The final url→status map from the state monitor.
pub async fn run<P>(
    probe: Arc<P>,
    config: &PollConfig,
    shutdown: watch::Receiver<bool>,
) -> HashMap<String, String>
where
    P: Probe + 'static,
{
    let poll_interval = Duration::from_secs(config.poll_interval_secs);
    let error_backoff = Duration::from_secs(config.error_backoff_secs);
    let status_interval = Duration::from_secs(config.status_interval_secs);

    let queue_capacity = config.urls.len().max(1);
    let (pending_tx, pending_rx) = mpsc::channel::<Resource>(queue_capacity);
    let (complete_tx, mut complete_rx) = mpsc::channel::<Resource>(queue_capacity);
    let (status_tx, monitor) = StateMonitor::spawn(status_interval);

    // Workers pull from one shared queue.
    let pending_rx = Arc::new(Mutex::new(pending_rx));

    let mut workers = Vec::with_capacity(config.num_workers);
    for worker_id in 0..config.num_workers {
        let pending_rx = pending_rx.clone();
        let complete_tx = complete_tx.clone();
        let status_tx = status_tx.clone();
        let probe = probe.clone();
        let mut shutdown = shutdown.clone();

        workers.push(tokio::spawn(async move {
            loop {
                let next = {
                    let mut queue = pending_rx.lock().await;
                    tokio::select! {
                        resource = queue.recv() => resource,
                        _ = shutdown.changed() => None,
                    }
                };
                let Some(mut resource) = next else { break };

                let status = resource.poll(probe.as_ref()).await;
                tracing::debug!("worker {}: {} -> {}", worker_id, resource.url(), status);

                let update = PollStatus {
                    url: resource.url().to_string(),
                    status,
                };
                if status_tx.send(update).await.is_err() {
                    break;
                }
                if complete_tx.send(resource).await.is_err() {
                    break;
                }
            }
            tracing::debug!("worker {} stopped", worker_id);
        }));
    }
    // Workers hold the only long-lived clones; the monitor and the
    // completion queue must close once they stop.
    drop(complete_tx);
    drop(status_tx);

    for url in &config.urls {
        // Capacity equals the number of URLs, so seeding cannot block.
        let _ = pending_tx.send(Resource::new(url.clone())).await;
    }

    // Completed resources sit out their back-off, then rejoin the queue.
    let requeue = {
        let pending_tx = pending_tx.clone();
        let mut shutdown = shutdown.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    completed = complete_rx.recv() => match completed {
                        Some(resource) => {
                            let delay = resource.backoff(poll_interval, error_backoff);
                            let pending_tx = pending_tx.clone();
                            tokio::spawn(async move {
                                tokio::time::sleep(delay).await;
                                // Fails only when the workers are gone.
                                let _ = pending_tx.send(resource).await;
                            });
                        }
                        None => break,
                    },
                    _ = shutdown.changed() => break,
                }
            }
        })
    };
    drop(pending_tx);

    for worker in workers {
        let _ = worker.await;
    }
    let _ = requeue.await;

    monitor.finish().await
}
