use anyhow::Context;
use tokio::sync::Mutex;

use super::alert_feed::AlertFeed;
use super::history::HistoryBuffer;
use crate::domain::detection::detector::AnomalyDetector;
use crate::domain::entities::anomaly::AnomalyEvent;
use crate::domain::entities::history::HistoryPoint;
use crate::domain::entities::snapshot::{DeviceId, DeviceSnapshot};
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::source::DeviceSource;
use crate::domain::value_objects::device_status::DeviceStatus;
use crate::domain::value_objects::metric::Metric;

/// Result of a single monitoring cycle.
#[derive(Debug, Clone, Default)]
pub struct MonitorCycleResult {
    pub devices_polled: usize,
    pub devices_skipped: usize,
    /// Every anomaly of the pass, device order then metric order.
    pub anomalies: Vec<AnomalyEvent>,
    /// Snapshots as processed, with missing statuses filled in.
    pub devices: Vec<DeviceSnapshot>,
}

/// Mutable state touched once per pass.
struct MonitorState {
    detector: AnomalyDetector,
    feed: AlertFeed,
    history: HistoryBuffer,
}

/// Orchestrates a monitoring cycle: fetch → detect → feed/history → notify.
pub struct MonitorService<'a> {
    source: &'a dyn DeviceSource,
    notifier: &'a dyn Notifier,
    state: Mutex<MonitorState>,
}

impl<'a> MonitorService<'a> {
    #[must_use]
    pub fn new(
        source: &'a dyn DeviceSource,
        notifier: &'a dyn Notifier,
        detector: AnomalyDetector,
        feed: AlertFeed,
        history: HistoryBuffer,
    ) -> Self {
        Self {
            source,
            notifier,
            state: Mutex::new(MonitorState {
                detector,
                feed,
                history,
            }),
        }
    }

    /// Load the initial chart history from the source.
    ///
    /// Returns the number of points kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot provide history.
    pub async fn seed_history(&self) -> anyhow::Result<usize> {
        let capacity = self.state.lock().await.history.capacity();
        let points = self
            .source
            .fetch_history(capacity)
            .await
            .context("Failed to fetch metric history")?;

        let mut state = self.state.lock().await;
        state.history.seed(points);
        Ok(state.history.len())
    }

    /// Run a single monitoring cycle: fetch → detect → feed/history → notify.
    ///
    /// Devices with non-finite metrics are logged and skipped; the rest of
    /// the pass continues.
    ///
    /// # Errors
    ///
    /// Returns an error if the device source fails.
    pub async fn run_once(&self) -> anyhow::Result<MonitorCycleResult> {
        let mut devices = self
            .source
            .fetch_devices()
            .await
            .context("Failed to fetch device snapshots")?;

        let mut anomalies = Vec::new();
        let mut devices_skipped = 0usize;
        {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            let thresholds = state.detector.thresholds().clone();
            let mut accepted = Vec::with_capacity(devices.len());

            for device in &mut devices {
                if device.status.is_none() {
                    device.status = Some(DeviceStatus::derive(
                        device.cpu,
                        device.memory,
                        &thresholds,
                    ));
                }
                match state.detector.record_and_evaluate(device.id, device) {
                    Ok(events) => {
                        anomalies.extend(events);
                        accepted.push(device.clone());
                    }
                    Err(e) => {
                        tracing::warn!(device = %device.hostname, "Skipping device: {e}");
                        devices_skipped += 1;
                    }
                }
            }

            state.feed.replace(&anomalies);
            state.history.record_pass(&accepted);
        }

        if anomalies.is_empty() {
            tracing::debug!(devices = devices.len(), "Fleet nominal, no anomalies");
        } else {
            tracing::warn!("{} anomaly event(s) detected", anomalies.len());
        }

        for event in &anomalies {
            if let Err(e) = self.notifier.notify(event) {
                tracing::warn!("Anomaly notification failed: {e}");
            }
        }

        Ok(MonitorCycleResult {
            devices_polled: devices.len(),
            devices_skipped,
            anomalies,
            devices,
        })
    }

    /// Current alert feed (first events of the latest pass).
    pub async fn alert_feed(&self) -> Vec<AnomalyEvent> {
        self.state.lock().await.feed.events().to_vec()
    }

    /// Current chart history, oldest point first.
    pub async fn history(&self) -> Vec<HistoryPoint> {
        self.state.lock().await.history.points()
    }

    /// Copy of one metric window, if the device has been seen.
    pub async fn window(&self, device_id: DeviceId, metric: Metric) -> Option<Vec<f64>> {
        self.state.lock().await.detector.window(device_id, metric)
    }

    pub async fn tracked_devices(&self) -> usize {
        self.state.lock().await.detector.device_count()
    }
}
