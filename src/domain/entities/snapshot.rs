use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::device_status::DeviceStatus;
use crate::domain::value_objects::metric::Metric;

/// Identity of a monitored device as assigned by the upstream source.
pub type DeviceId = u32;

/// Point-in-time reading for one device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSnapshot {
    pub id: DeviceId,
    pub hostname: String,
    pub ip: String,
    /// Status as reported upstream; filled by threshold derivation when absent.
    #[serde(default)]
    pub status: Option<DeviceStatus>,
    /// CPU utilisation (%), nominally 0–100
    pub cpu: f64,
    /// Memory utilisation (%)
    pub memory: f64,
    /// Round-trip latency (ms)
    pub latency: f64,
    /// Current throughput (Mbps)
    pub bandwidth: f64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DeviceSnapshot {
    #[must_use]
    pub const fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cpu => self.cpu,
            Metric::Memory => self.memory,
            Metric::Latency => self.latency,
            Metric::Bandwidth => self.bandwidth,
        }
    }

    /// First metric holding NaN or an infinity, if any.
    #[must_use]
    pub fn non_finite_metric(&self) -> Option<Metric> {
        Metric::ALL
            .into_iter()
            .find(|&metric| !self.value(metric).is_finite())
    }
}
