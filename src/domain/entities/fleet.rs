use serde::Serialize;

use super::snapshot::DeviceSnapshot;
use crate::domain::value_objects::device_status::DeviceStatus;

/// Headline numbers for the whole fleet at one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total: usize,
    pub online: usize,
    pub warning: usize,
    pub critical: usize,
    /// Share of devices online, rounded percent (0 for an empty fleet).
    pub health_percent: u8,
    pub avg_latency_ms: u32,
    pub total_bandwidth_mbps: u32,
    pub active_alerts: usize,
}

impl FleetSummary {
    /// Summarise a pass. Devices without a status count as online.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn from_devices(devices: &[DeviceSnapshot], active_alerts: usize) -> Self {
        let count_of = |status: DeviceStatus| {
            devices
                .iter()
                .filter(|d| d.status.unwrap_or_default() == status)
                .count()
        };
        let total = devices.len();
        let online = count_of(DeviceStatus::Online);

        let (health_percent, avg_latency_ms) = if total == 0 {
            (0, 0)
        } else {
            let n = total as f64;
            let latency = devices.iter().map(|d| d.latency).sum::<f64>() / n;
            (
                (online as f64 / n * 100.0).round() as u8,
                latency.round().max(0.0) as u32,
            )
        };
        let bandwidth: f64 = devices.iter().map(|d| d.bandwidth).sum();

        Self {
            total,
            online,
            warning: count_of(DeviceStatus::Warning),
            critical: count_of(DeviceStatus::Critical),
            health_percent,
            avg_latency_ms,
            total_bandwidth_mbps: bandwidth.round().max(0.0) as u32,
            active_alerts,
        }
    }
}
