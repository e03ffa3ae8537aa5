//! Shared visited-URL tracking
//!
//! The visited set is the single piece of shared mutable state in a crawl.
//! Every task submits its URL here before doing anything else; the first
//! submission claims the URL and all later submissions are told to stand
//! down. All serialization in the crawl funnels through this one lock,
//! which is held only for the map update.

use std::collections::HashMap;
use std::sync::Mutex;

/// Records which URLs have been claimed during one crawl, and how many
/// times each was submitted.
///
/// Counts are monotonic for the lifetime of the set; there is no unmark
/// operation. URL identity is exact string equality.
#[derive(Debug, Default)]
pub struct VisitedSet {
    submissions: Mutex<HashMap<String, u64>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits a URL, returning `true` if it had already been claimed by
    /// an earlier submission.
    ///
    /// The submission count is incremented unconditionally, so concurrent
    /// callers racing on the same URL each get a distinct count and
    /// exactly one of them sees `false`.
    pub fn check_and_mark(&self, url: &str) -> bool {
        let mut submissions = self.submissions.lock().unwrap();
        let count = submissions.entry(url.to_string()).or_insert(0);
        *count += 1;
        *count > 1
    }

    /// Returns how many times a URL has been submitted so far.
    pub fn submissions(&self, url: &str) -> u64 {
        let submissions = self.submissions.lock().unwrap();
        submissions.get(url).copied().unwrap_or(0)
    }

    /// Returns the number of distinct URLs claimed so far.
    pub fn claimed_count(&self) -> usize {
        let submissions = self.submissions.lock().unwrap();
        submissions.len()
    }
}
