use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::metric::Metric;
use crate::domain::value_objects::severity::Severity;

/// A scored anomaly on one metric of one device.
///
/// Built fresh on every detection pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyEvent {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub device_name: String,
    pub device_ip: String,
    pub metric: Metric,
    pub value: f64,
    pub unit: String,
    pub z_score: f64,
    pub message: String,
    pub prediction: String,
    /// Display confidence in 0–100, not a probability.
    pub confidence: u8,
}
