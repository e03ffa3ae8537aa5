//! Polling system with a central state monitor
//!
//! A fixed worker pool polls URLs from a shared queue on a cycle. Nobody
//! locks the status map: a single monitor task owns it and everyone else
//! sends updates over a channel. Consecutive failures push a resource's
//! next poll further out.

mod monitor;
mod pool;
mod probe;
mod resource;

pub use monitor::{PollStatus, StateMonitor};
pub use pool::run;
pub use probe::{HttpProbe, Probe, ProbeError};
pub use resource::Resource;
