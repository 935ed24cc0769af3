pub mod anomaly_settings;
pub mod device_status;
pub mod metric;
pub mod severity;
pub mod thresholds;

pub use anomaly_settings::AnomalySettings;
pub use device_status::DeviceStatus;
pub use metric::Metric;
pub use severity::Severity;
pub use thresholds::ThresholdSet;
