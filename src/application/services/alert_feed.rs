use crate::domain::entities::anomaly::AnomalyEvent;

/// Bounded list of the most recent pass's anomalies, in production order.
#[derive(Debug, Clone)]
pub struct AlertFeed {
    max_alerts: usize,
    events: Vec<AnomalyEvent>,
}

impl AlertFeed {
    #[must_use]
    pub const fn new(max_alerts: usize) -> Self {
        Self {
            max_alerts,
            events: Vec::new(),
        }
    }

    /// Replace the feed with the first `max_alerts` events of a pass.
    ///
    /// An empty pass clears the feed.
    pub fn replace(&mut self, events: &[AnomalyEvent]) {
        self.events.clear();
        self.events
            .extend(events.iter().take(self.max_alerts).cloned());
    }

    #[must_use]
    pub fn events(&self) -> &[AnomalyEvent] {
        &self.events
    }

    #[must_use]
    pub const fn max_alerts(&self) -> usize {
        self.max_alerts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for AlertFeed {
    fn default() -> Self {
        Self::new(5)
    }
}
