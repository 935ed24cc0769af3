//! Rolling-window statistics and Z-score anomaly classification.
//!
//! Everything in here is synchronous, CPU-bound and free of I/O: a detection
//! pass never suspends.

pub mod detector;
pub mod stats;
pub mod window;

pub use detector::{AnomalyDetector, DetectionError};
pub use window::RollingWindow;
