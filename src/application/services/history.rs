use std::collections::VecDeque;

use crate::domain::entities::history::HistoryPoint;
use crate::domain::entities::snapshot::DeviceSnapshot;

/// Label given to the point appended after each live pass.
pub const LIVE_LABEL: &str = "now";

/// Rolling fleet-wide chart history with a fixed length.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    capacity: usize,
    points: VecDeque<HistoryPoint>,
}

impl HistoryBuffer {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    /// Replace the buffer with the newest `capacity` points of `points`.
    pub fn seed(&mut self, points: Vec<HistoryPoint>) {
        let skip = points.len().saturating_sub(self.capacity);
        self.points = points.into_iter().skip(skip).collect();
    }

    /// Append the averages of one pass, dropping the oldest point when full.
    ///
    /// Returns the appended point, or `None` for a pass without devices.
    pub fn record_pass(&mut self, snapshots: &[DeviceSnapshot]) -> Option<HistoryPoint> {
        if self.capacity == 0 {
            return None;
        }
        let point = average_point(snapshots)?;
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point.clone());
        Some(point)
    }

    #[must_use]
    pub fn points(&self) -> Vec<HistoryPoint> {
        self.points.iter().cloned().collect()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

#[allow(clippy::cast_precision_loss)]
fn average_point(snapshots: &[DeviceSnapshot]) -> Option<HistoryPoint> {
    if snapshots.is_empty() {
        return None;
    }
    let n = snapshots.len() as f64;
    let avg = |extract: fn(&DeviceSnapshot) -> f64| snapshots.iter().map(extract).sum::<f64>() / n;
    Some(HistoryPoint {
        label: LIVE_LABEL.to_string(),
        bandwidth: avg(|s| s.bandwidth),
        latency: avg(|s| s.latency),
        cpu: avg(|s| s.cpu),
    })
}
