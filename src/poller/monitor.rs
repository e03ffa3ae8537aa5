//! Central state monitor
//!
//! The monitor task is the only owner of the url→status map; workers
//! share state with it by sending updates over a channel instead of
//! locking a shared map. It logs the full map on a fixed interval and
//! hands the final map back when the last update sender drops.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// The last-known state of one polled URL
#[derive(Debug, Clone)]
pub struct PollStatus {
    pub url: String,
    pub status: String,
}

/// Handle to the running monitor task
pub struct StateMonitor {
    handle: JoinHandle<HashMap<String, String>>,
}

impl StateMonitor {
    /// Spawns the monitor task
    ///
    /// Returns the update sender alongside the handle; clone the sender
    /// into every task that reports status. The monitor exits when all
    /// senders have dropped.
    pub fn spawn(log_interval: Duration) -> (mpsc::Sender<PollStatus>, Self) {
        let (updates_tx, mut updates_rx) = mpsc::channel::<PollStatus>(32);

        let handle = tokio::spawn(async move {
            let mut state: HashMap<String, String> = HashMap::new();
            // First tick one full interval out, not immediately.
            let mut ticker = interval_at(Instant::now() + log_interval, log_interval);

            loop {
                tokio::select! {
                    _ = ticker.tick() => log_state(&state),
                    update = updates_rx.recv() => match update {
                        Some(PollStatus { url, status }) => {
                            state.insert(url, status);
                        }
                        None => break,
                    },
                }
            }

            state
        });

        (updates_tx, Self { handle })
    }

    /// Waits for the monitor to exit and returns the final state map.
    pub async fn finish(self) -> HashMap<String, String> {
        self.handle.await.unwrap_or_default()
    }
}

fn log_state(state: &HashMap<String, String>) {
    tracing::info!("current state:");
    for (url, status) in state {
        tracing::info!(" {} {}", url, status);
    }
}
