use serde::{Deserialize, Serialize};

use super::metric::Metric;

/// Per-metric warning/critical levels used for status derivation and
/// anomaly severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    /// CPU usage percentage that marks a device as warning
    pub cpu_warning: f64,
    /// CPU usage percentage above which a device or anomaly is critical
    pub cpu_critical: f64,
    /// Memory usage percentage that marks a device as warning
    pub memory_warning: f64,
    /// Memory usage percentage above which a device or anomaly is critical
    pub memory_critical: f64,
    /// Round-trip latency (ms) considered degraded
    pub latency_warning: f64,
    /// Round-trip latency (ms) above which an anomaly is critical
    pub latency_critical: f64,
}

impl ThresholdSet {
    /// Critical level for a metric. Bandwidth has none and can never be
    /// classified critical.
    #[must_use]
    pub const fn critical_for(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Cpu => Some(self.cpu_critical),
            Metric::Memory => Some(self.memory_critical),
            Metric::Latency => Some(self.latency_critical),
            Metric::Bandwidth => None,
        }
    }

    /// Warning level for a metric, if it has one.
    #[must_use]
    pub const fn warning_for(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Cpu => Some(self.cpu_warning),
            Metric::Memory => Some(self.memory_warning),
            Metric::Latency => Some(self.latency_warning),
            Metric::Bandwidth => None,
        }
    }
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            cpu_warning: 75.0,
            cpu_critical: 85.0,
            memory_warning: 80.0,
            memory_critical: 90.0,
            latency_warning: 20.0,
            latency_critical: 35.0,
        }
    }
}
