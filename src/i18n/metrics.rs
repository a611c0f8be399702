//! Translation metrics and observability module.
//!
//! Each registry keeps its own counters for resolutions, fallbacks,
//! message misses and registrations.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one translation registry.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Number of pack resolutions
    resolves: AtomicUsize,

    /// Number of resolutions that fell back to the default language
    fallbacks: AtomicUsize,

    /// Number of message lookups that found nothing
    message_misses: AtomicUsize,

    /// Number of successful pack registrations
    registrations: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pack resolution.
    pub fn record_resolve(&self) {
        self.resolves.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a resolution served by the fallback pack.
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a missing error entry or category message.
    pub fn record_message_miss(&self) {
        self.message_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a pack registration.
    pub fn record_registration(&self) {
        self.registrations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn resolves(&self) -> usize {
        self.resolves.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn message_misses(&self) -> usize {
        self.message_misses.load(Ordering::Relaxed)
    }

    pub fn registrations(&self) -> usize {
        self.registrations.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let resolves = self.resolves();
        let fallbacks = self.fallbacks();
        let fallback_rate = if resolves > 0 {
            (fallbacks as f64 / resolves as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            resolves,
            fallbacks,
            fallback_rate,
            message_misses: self.message_misses(),
            registrations: self.registrations(),
        }
    }
}

/// Snapshot of the translation counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Number of pack resolutions
    pub resolves: usize,

    /// Number of resolutions served by the fallback pack
    pub fallbacks: usize,

    /// Fallback rate as a percentage (0-100)
    pub fallback_rate: f64,

    /// Number of message lookups that found nothing
    pub message_misses: usize,

    /// Number of pack registrations
    pub registrations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = TranslationMetrics::new();
        assert_eq!(metrics.resolves(), 0);
        assert_eq!(metrics.fallbacks(), 0);
        assert_eq!(metrics.message_misses(), 0);
        assert_eq!(metrics.registrations(), 0);
    }

    #[test]
    fn test_record_each_counter() {
        let metrics = TranslationMetrics::new();

        metrics.record_resolve();
        metrics.record_resolve();
        metrics.record_fallback();
        metrics.record_message_miss();
        metrics.record_registration();

        assert_eq!(metrics.resolves(), 2);
        assert_eq!(metrics.fallbacks(), 1);
        assert_eq!(metrics.message_misses(), 1);
        assert_eq!(metrics.registrations(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = TranslationMetrics::new().report();
        assert_eq!(report.resolves, 0);
        assert_eq!(report.fallback_rate, 0.0);
    }

    #[test]
    fn test_report_fallback_rate() {
        let metrics = TranslationMetrics::new();

        // 4 resolves, 1 fallback = 25%
        for _ in 0..4 {
            metrics.record_resolve();
        }
        metrics.record_fallback();

        let report = metrics.report();
        assert_eq!(report.resolves, 4);
        assert_eq!(report.fallbacks, 1);
        assert_eq!(report.fallback_rate, 25.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = TranslationMetrics::new();
        metrics.record_registration();

        let json = serde_json::to_value(metrics.report()).expect("Should serialize");
        assert_eq!(json["registrations"], 1);
        assert_eq!(json["message_misses"], 0);
    }
}
