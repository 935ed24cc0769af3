use std::collections::HashMap;

use chrono::Utc;
use thiserror::Error;

use super::stats::{confidence_from_z, z_score};
use super::window::RollingWindow;
use crate::domain::entities::anomaly::AnomalyEvent;
use crate::domain::entities::snapshot::{DeviceId, DeviceSnapshot};
use crate::domain::value_objects::anomaly_settings::AnomalySettings;
use crate::domain::value_objects::metric::Metric;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::thresholds::ThresholdSet;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    #[error("device {device_id}: {metric} value is not finite")]
    InvalidSample { device_id: DeviceId, metric: Metric },
}

/// One rolling window per tracked metric, indexed by [`Metric::index`].
#[derive(Debug, Clone)]
struct MetricWindows {
    windows: [RollingWindow; 4],
}

impl MetricWindows {
    fn new(capacity: usize) -> Self {
        Self {
            windows: std::array::from_fn(|_| RollingWindow::new(capacity)),
        }
    }

    fn get(&self, metric: Metric) -> &RollingWindow {
        &self.windows[metric.index()]
    }

    fn get_mut(&mut self, metric: Metric) -> &mut RollingWindow {
        &mut self.windows[metric.index()]
    }
}

/// Per-device rolling-window store and Z-score classifier.
///
/// The windows are private: callers only feed snapshots in and read copies
/// out. Mutation needs `&mut self`, so one owner (or one lock holder) drives
/// every pass.
pub struct AnomalyDetector {
    settings: AnomalySettings,
    thresholds: ThresholdSet,
    devices: HashMap<DeviceId, MetricWindows>,
}

impl AnomalyDetector {
    #[must_use]
    pub fn new(settings: AnomalySettings, thresholds: ThresholdSet) -> Self {
        Self {
            settings,
            thresholds,
            devices: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &AnomalySettings {
        &self.settings
    }

    #[must_use]
    pub const fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }

    /// Append the snapshot to the device's windows, then score each metric
    /// against its updated window.
    ///
    /// The new observation is part of its own reference window. Returns at
    /// most one event per metric, in [`Metric::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::InvalidSample` if any metric is NaN or
    /// infinite. No window is modified in that case.
    pub fn record_and_evaluate(
        &mut self,
        device_id: DeviceId,
        snapshot: &DeviceSnapshot,
    ) -> Result<Vec<AnomalyEvent>, DetectionError> {
        if let Some(metric) = snapshot.non_finite_metric() {
            return Err(DetectionError::InvalidSample { device_id, metric });
        }

        let capacity = self.settings.window_size;
        let windows = self
            .devices
            .entry(device_id)
            .or_insert_with(|| MetricWindows::new(capacity));

        let mut events = Vec::new();
        for metric in Metric::ALL {
            let value = snapshot.value(metric);
            let window = windows.get_mut(metric);
            window.push(value);
            let samples = window.as_slice();

            let z = z_score(value, samples);
            if z >= self.settings.z_threshold {
                events.push(build_event(
                    &self.settings,
                    &self.thresholds,
                    snapshot,
                    Scored { metric, value, z },
                ));
            }
        }

        if !events.is_empty() {
            tracing::debug!(
                device = %snapshot.hostname,
                count = events.len(),
                "anomalies detected"
            );
        }

        Ok(events)
    }

    /// Copy of one metric window for a device, oldest sample first.
    #[must_use]
    pub fn window(&self, device_id: DeviceId, metric: Metric) -> Option<Vec<f64>> {
        self.devices
            .get(&device_id)
            .map(|w| w.get(metric).to_vec())
    }

    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
}

/// A metric reading that crossed the Z-score threshold.
struct Scored {
    metric: Metric,
    value: f64,
    z: f64,
}

fn build_event(
    settings: &AnomalySettings,
    thresholds: &ThresholdSet,
    snapshot: &DeviceSnapshot,
    scored: Scored,
) -> AnomalyEvent {
    let Scored { metric, value, z } = scored;
    let critical = thresholds
        .critical_for(metric)
        .is_some_and(|limit| value > limit);
    let severity = if critical {
        Severity::Critical
    } else {
        Severity::Warning
    };
    let unit = metric.unit();

    AnomalyEvent {
        timestamp: snapshot.updated_at.unwrap_or_else(Utc::now),
        severity,
        device_name: snapshot.hostname.clone(),
        device_ip: snapshot.ip.clone(),
        metric,
        value,
        unit: unit.to_string(),
        z_score: z,
        message: format!(
            "{} is {value:.1}{unit} \u{2014} Z-score {z:.2} ({z:.1}\u{3c3} above mean)",
            metric.label()
        ),
        prediction: severity.prediction().to_string(),
        confidence: confidence_from_z(z, settings.z_threshold),
    }
}
