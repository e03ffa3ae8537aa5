//! Completion detection for fan-out task trees
//!
//! A crawl spawns tasks recursively with no join handles retained, so the
//! only way to know the whole tree has finished is to count: one `add`
//! before every spawn, one decrement when the task's body finishes.
//! `wait` resolves exactly when the two agree.

use tokio::sync::watch;

/// Counts outstanding tasks and wakes waiters when the count drains to
/// zero.
///
/// Invariants the caller must uphold: every `add` happens before the
/// corresponding task's guard drops, `wait` is only called after the
/// first `add`, and no `add` happens after the counter has drained.
#[derive(Debug, Clone)]
pub struct TaskCounter {
    outstanding: watch::Sender<usize>,
}

impl TaskCounter {
    pub fn new() -> Self {
        let (outstanding, _) = watch::channel(0);
        Self { outstanding }
    }

    /// Registers `n` units of not-yet-finished work. Called before each
    /// spawn, including the root task.
    pub fn add(&self, n: usize) {
        self.outstanding.send_modify(|count| *count += n);
    }

    /// Returns a guard whose drop marks one unit of work finished. Created
    /// at the top of a task body so the decrement fires on every exit
    /// path.
    pub fn guard(&self) -> TaskGuard {
        TaskGuard {
            outstanding: self.outstanding.clone(),
        }
    }

    /// Blocks the calling task until the outstanding count reaches zero.
    pub async fn wait(&self) {
        let mut watcher = self.outstanding.subscribe();
        while *watcher.borrow_and_update() != 0 {
            // The sender lives in self, so changed() only errs if we are
            // dropped mid-wait.
            if watcher.changed().await.is_err() {
                break;
            }
        }
    }

    /// Current outstanding count.
    pub fn outstanding(&self) -> usize {
        *self.outstanding.borrow()
    }
}

impl Default for TaskCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Decrements the owning counter by one when dropped.
#[derive(Debug)]
pub struct TaskGuard {
    outstanding: watch::Sender<usize>,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.outstanding
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}
