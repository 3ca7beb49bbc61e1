//! Dispatch metrics.
//!
//! Collected on every dispatch; cheap enough that there is no opt-out. They
//! feed the `debug!` event emitted per turn and the `--explain` trace.

use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchMetrics {
    /// Total time from normalization to the handler's return.
    pub total: Duration,
    /// Time spent trying patterns.
    pub matching: Duration,
    /// Time spent inside the winning handler (zero on fallback).
    pub handler: Duration,
    /// Number of patterns tried, including the one that matched.
    pub evaluated: usize,
}
