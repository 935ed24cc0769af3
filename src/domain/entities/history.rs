use serde::{Deserialize, Serialize};

/// One fleet-wide chart point: metric averages across devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    #[serde(rename = "time")]
    pub label: String,
    pub bandwidth: f64,
    pub latency: f64,
    pub cpu: f64,
}
