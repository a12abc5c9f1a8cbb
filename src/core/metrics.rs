//! Async dispatch metrics
//!
//! Counters for monitoring queue health: how much was enqueued and
//! delivered, how often the queue filled up, and how many records were lost
//! to the drop policies. Lost-message accounting is the only diagnostic the
//! overflow path exposes; nothing is raised into caller control flow.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct QueueMetrics {
    /// Records accepted into the queue
    enqueued: AtomicU64,

    /// Records fanned out to their sinks by the worker
    delivered: AtomicU64,

    /// Records lost to DropNewest / DropOldest
    dropped: AtomicU64,

    /// Number of times the queue was full at enqueue time
    queue_full_events: AtomicU64,

    /// Number of times a producer blocked waiting for space
    block_events: AtomicU64,
}

impl QueueMetrics {
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            queue_full_events: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queue_full_events(&self) -> u64 {
        self.queue_full_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn record_enqueued(&self) {
        self.enqueued.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn record_queue_full(&self) {
        self.queue_full_events.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_block(&self) {
        self.block_events.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_start_at_zero() {
        let metrics = QueueMetrics::new();
        assert_eq!(metrics.enqueued(), 0);
        assert_eq!(metrics.delivered(), 0);
        assert_eq!(metrics.dropped(), 0);
        assert_eq!(metrics.queue_full_events(), 0);
        assert_eq!(metrics.block_events(), 0);
    }

    #[test]
    fn test_counters_accumulate() {
        let metrics = QueueMetrics::new();
        metrics.record_enqueued();
        metrics.record_enqueued();
        metrics.record_delivered();
        assert_eq!(metrics.record_dropped(), 0);
        metrics.record_queue_full();
        metrics.record_block();

        assert_eq!(metrics.enqueued(), 2);
        assert_eq!(metrics.delivered(), 1);
        assert_eq!(metrics.dropped(), 1);
        assert_eq!(metrics.queue_full_events(), 1);
        assert_eq!(metrics.block_events(), 1);
    }
}
