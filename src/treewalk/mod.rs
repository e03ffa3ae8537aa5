//! Channel-based binary tree comparison
//!
//! A producer/consumer variant of the crawler's ideas at miniature scale:
//! two walker tasks stream tree values into channels and a consumer zips
//! the streams to decide equivalence.

mod tree;
mod walk;

pub use tree::Tree;
pub use walk::{same_values, walk};
