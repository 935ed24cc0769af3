use serde::{Deserialize, Serialize};

/// Tuning of the rolling-window Z-score detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalySettings {
    /// Samples retained per metric per device
    pub window_size: usize,
    /// Standard deviations from the rolling mean that trigger an anomaly
    pub z_threshold: f64,
}

impl Default for AnomalySettings {
    fn default() -> Self {
        Self {
            window_size: 20,
            z_threshold: 2.5,
        }
    }
}
