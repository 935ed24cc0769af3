use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::entities::snapshot::DeviceSnapshot;
use crate::domain::ports::source::{DeviceSource, SourceError};

/// Replays recorded ticks from a JSON file: an array of ticks, each an
/// array of device snapshots. One tick is served per fetch.
pub struct FileDeviceSource {
    path: PathBuf,
    ticks: Vec<Vec<DeviceSnapshot>>,
    cursor: AtomicUsize,
}

impl FileDeviceSource {
    /// Load a replay file; `~` is expanded.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Unavailable` if the file cannot be read and
    /// `SourceError::InvalidPayload` if it is not an array of ticks.
    pub fn load(path: &str) -> Result<Self, SourceError> {
        let path = PathBuf::from(shellexpand::tilde(path).as_ref());
        let content = std::fs::read_to_string(&path).map_err(|e| {
            SourceError::Unavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        let ticks: Vec<Vec<DeviceSnapshot>> = serde_json::from_str(&content)
            .map_err(|e| SourceError::InvalidPayload(format!("{}: {e}", path.display())))?;

        tracing::debug!(path = %path.display(), ticks = ticks.len(), "replay file loaded");
        Ok(Self::from_ticks(path, ticks))
    }

    #[must_use]
    pub fn from_ticks(path: PathBuf, ticks: Vec<Vec<DeviceSnapshot>>) -> Self {
        Self {
            path,
            ticks,
            cursor: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.ticks.len()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.ticks
            .len()
            .saturating_sub(self.cursor.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl DeviceSource for FileDeviceSource {
    async fn fetch_devices(&self) -> Result<Vec<DeviceSnapshot>, SourceError> {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.ticks
            .get(index)
            .cloned()
            .ok_or(SourceError::Exhausted(self.ticks.len()))
    }
}
