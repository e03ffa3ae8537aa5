//! Integration tests for the spindrift demos
//!
//! Crawl semantics are exercised against canned fetchers; the HTTP
//! fetcher and a full live crawl run against wiremock servers; the
//! poller runs against scripted probes.

mod fetch_tests;
mod poller_tests;
