//! Producer/consumer tree comparison
//!
//! Two trees hold the same values exactly when their in-order walks
//! produce the same sequence. Each walk runs as its own task streaming
//! values into a channel; the comparison consumes both streams in
//! lockstep and stops at the first difference. A dropped sender is the
//! end-of-stream signal.

use crate::treewalk::tree::Tree;
use std::future::Future;
use std::pin::Pin;
use tokio::sync::mpsc;

/// Walks the tree in order, sending each value into `values`
///
/// The channel is expected to be bounded with a small capacity, so the
/// walker suspends until the consumer is ready for the next value. Send
/// errors mean the consumer has gone away; the walk winds down quietly.
pub fn walk(tree: Tree, values: mpsc::Sender<i64>) -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(async move {
        let (value, left, right) = tree.into_parts();
        if let Some(left) = left {
            walk(*left, values.clone()).await;
        }
        let _ = values.send(value).await;
        if let Some(right) = right {
            walk(*right, values.clone()).await;
        }
    })
}

/// Reports whether two trees contain the same multiset of values
///
/// Spawns one walker task per tree and compares the streams element-wise;
/// one stream ending before the other compares unequal.
pub async fn same_values(a: Tree, b: Tree) -> bool {
    let (tx_a, mut rx_a) = mpsc::channel(1);
    let (tx_b, mut rx_b) = mpsc::channel(1);

    tokio::spawn(walk(a, tx_a));
    tokio::spawn(walk(b, tx_b));

    loop {
        let (next_a, next_b) = tokio::join!(rx_a.recv(), rx_b.recv());
        match (next_a, next_b) {
            (None, None) => return true,
            (Some(va), Some(vb)) if va == vb => continue,
            _ => return false,
        }
    }
}
