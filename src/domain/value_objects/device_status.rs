use serde::{Deserialize, Serialize};

use super::thresholds::ThresholdSet;

/// Operational status of a device, derived from fixed thresholds.
///
/// This is a separate signal from statistical anomalies: a device can be
/// `Critical` without any anomaly this tick, and an anomaly can fire on an
/// `Online` device.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    #[default]
    Online,
    Warning,
    Critical,
}

impl DeviceStatus {
    /// Rule-based classification from CPU and memory usage.
    #[must_use]
    pub fn derive(cpu: f64, memory: f64, thresholds: &ThresholdSet) -> Self {
        if cpu > thresholds.cpu_critical || memory > thresholds.memory_critical {
            Self::Critical
        } else if cpu > thresholds.cpu_warning || memory > thresholds.memory_warning {
            Self::Warning
        } else {
            Self::Online
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}
