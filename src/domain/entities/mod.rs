pub mod anomaly;
pub mod fleet;
pub mod history;
pub mod snapshot;

pub use anomaly::AnomalyEvent;
pub use fleet::FleetSummary;
pub use history::HistoryPoint;
pub use snapshot::{DeviceId, DeviceSnapshot};
