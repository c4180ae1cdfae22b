//! Metrics hooks for lifecycle engine operations.
//!
//! Thread-safe counters recorded by the bus adapter as it handles
//! events. External metrics systems can plug in through the
//! `MetricsRecorder` trait.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for lifecycle operations.
#[derive(Default)]
pub struct Metrics {
    /// Total web-client requests handled.
    pub requests_handled: AtomicU64,
    /// Requests answered with a non-OK status.
    pub requests_rejected: AtomicU64,
    /// Block confirmations recorded.
    pub confirmations_recorded: AtomicU64,
    /// Settlements applied.
    pub settlements_applied: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one handled web-client request.
    ///
    /// # Arguments
    /// * `ok` - Whether the response status was `OK`
    pub fn record_request(&self, ok: bool) {
        self.requests_handled.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.requests_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record one applied block confirmation.
    pub fn record_confirmation(&self) {
        self.confirmations_recorded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one applied settlement.
    pub fn record_settlement(&self) {
        self.settlements_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_handled: self.requests_handled.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            confirmations_recorded: self.confirmations_recorded.load(Ordering::Relaxed),
            settlements_applied: self.settlements_applied.load(Ordering::Relaxed),
        }
    }

    /// Fraction of handled requests that were rejected.
    pub fn rejection_rate(&self) -> f64 {
        let total = self.requests_handled.load(Ordering::Relaxed);
        let rejected = self.requests_rejected.load(Ordering::Relaxed);
        if total > 0 {
            rejected as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.requests_handled.store(0, Ordering::Relaxed);
        self.requests_rejected.store(0, Ordering::Relaxed);
        self.confirmations_recorded.store(0, Ordering::Relaxed);
        self.settlements_applied.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests_handled: u64,
    pub requests_rejected: u64,
    pub confirmations_recorded: u64,
    pub settlements_applied: u64,
}

/// Trait for custom metrics recording implementations.
///
/// Implement this trait to integrate with external metrics systems.
pub trait MetricsRecorder: Send + Sync {
    /// Record one handled web-client request.
    fn record_request(&self, ok: bool);

    /// Record one applied block confirmation.
    fn record_confirmation(&self);

    /// Record one applied settlement.
    fn record_settlement(&self);
}

/// No-op metrics recorder for when metrics are disabled.
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_request(&self, _: bool) {}
    fn record_confirmation(&self) {}
    fn record_settlement(&self) {}
}

impl MetricsRecorder for Metrics {
    fn record_request(&self, ok: bool) {
        Metrics::record_request(self, ok);
    }

    fn record_confirmation(&self) {
        Metrics::record_confirmation(self);
    }

    fn record_settlement(&self) {
        Metrics::record_settlement(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initialization() {
        let metrics = Metrics::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_record_requests_and_rejections() {
        let metrics = Metrics::new();

        metrics.record_request(true);
        metrics.record_request(false);
        metrics.record_request(true);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests_handled, 3);
        assert_eq!(snapshot.requests_rejected, 1);
        assert!((metrics.rejection_rate() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_lifecycle_counters() {
        let metrics = Metrics::new();

        metrics.record_confirmation();
        metrics.record_confirmation();
        metrics.record_settlement();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.confirmations_recorded, 2);
        assert_eq!(snapshot.settlements_applied, 1);
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();
        metrics.record_request(false);
        metrics.record_settlement();

        metrics.reset();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
        assert_eq!(metrics.rejection_rate(), 0.0);
    }

    #[test]
    fn test_noop_metrics() {
        // Just verify NoOpMetrics compiles and doesn't panic
        let metrics = NoOpMetrics;
        metrics.record_request(true);
        metrics.record_confirmation();
        metrics.record_settlement();
    }
}
