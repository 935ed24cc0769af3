use std::io::Write;
use std::path::PathBuf;

use crate::domain::entities::anomaly::AnomalyEvent;
use crate::domain::ports::notifier::{NotificationError, Notifier};

const DEFAULT_LOG_PATH: &str = "~/.local/share/netwatch/anomalies.log";

/// Appends each anomaly event to a file as one JSON line.
pub struct LogFileNotifier {
    path: PathBuf,
}

impl LogFileNotifier {
    #[must_use]
    pub fn new(path: &str) -> Self {
        let expanded = shellexpand::tilde(path);
        Self {
            path: PathBuf::from(expanded.as_ref()),
        }
    }

    fn append_json_line(&self, value: &serde_json::Value) -> Result<(), NotificationError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                NotificationError::SendFailed(format!("cannot create log directory: {e}"))
            })?;
        }

        let json = serde_json::to_string(value)
            .map_err(|e| NotificationError::SendFailed(format!("JSON serialization error: {e}")))?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| NotificationError::SendFailed(format!("cannot open log file: {e}")))?;

        writeln!(file, "{json}")
            .map_err(|e| NotificationError::SendFailed(format!("cannot write log file: {e}")))
    }
}

impl Default for LogFileNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PATH)
    }
}

impl Notifier for LogFileNotifier {
    fn notify(&self, event: &AnomalyEvent) -> Result<(), NotificationError> {
        let entry = serde_json::json!({
            "timestamp": event.timestamp.to_rfc3339(),
            "severity": event.severity,
            "device": event.device_name,
            "ip": event.device_ip,
            "metric": event.metric,
            "value": event.value,
            "unit": event.unit,
            "zScore": event.z_score,
            "confidence": event.confidence,
            "message": event.message,
        });

        self.append_json_line(&entry)
    }
}
