use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::history::HistoryPoint;
use crate::domain::entities::snapshot::DeviceSnapshot;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("device source unreachable: {0}")]
    Unavailable(String),
    #[error("device source returned HTTP {0}")]
    Http(u16),
    #[error("invalid payload from device source: {0}")]
    InvalidPayload(String),
    #[error("timeout while fetching device metrics")]
    Timeout,
    #[error("replay exhausted after {0} tick(s)")]
    Exhausted(usize),
}

/// Upstream provider of periodic device snapshots.
#[async_trait]
pub trait DeviceSource: Send + Sync {
    /// Fetch the current snapshot of every device.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the source is unreachable, times out,
    /// answers with an error status, or sends a malformed payload.
    async fn fetch_devices(&self) -> Result<Vec<DeviceSnapshot>, SourceError>;

    /// Fetch up to `points` fleet-wide history points for charting.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`DeviceSource::fetch_devices`].
    async fn fetch_history(&self, _points: usize) -> Result<Vec<HistoryPoint>, SourceError> {
        Ok(Vec::new())
    }
}
