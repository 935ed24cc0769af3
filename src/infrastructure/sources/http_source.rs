use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::entities::history::HistoryPoint;
use crate::domain::entities::snapshot::DeviceSnapshot;
use crate::domain::ports::source::{DeviceSource, SourceError};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polls a REST backend exposing `/api/v1/devices` and
/// `/api/v1/metrics/history`.
pub struct HttpDeviceSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDeviceSource {
    /// # Errors
    ///
    /// Returns `SourceError::Unavailable` if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| SourceError::Unavailable(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn devices_url(&self) -> String {
        format!("{}/api/v1/devices", self.base_url)
    }

    fn history_url(&self, points: usize) -> String {
        format!("{}/api/v1/metrics/history?points={points}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let response = self.client.get(url).send().await.map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_request_error)?;
        serde_json::from_slice(&body).map_err(|e| SourceError::InvalidPayload(e.to_string()))
    }
}

fn map_request_error(e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout
    } else {
        SourceError::Unavailable(e.to_string())
    }
}

#[async_trait]
impl DeviceSource for HttpDeviceSource {
    async fn fetch_devices(&self) -> Result<Vec<DeviceSnapshot>, SourceError> {
        let url = self.devices_url();
        tracing::debug!(%url, "fetching devices");
        self.get_json(&url).await
    }

    async fn fetch_history(&self, points: usize) -> Result<Vec<HistoryPoint>, SourceError> {
        let url = self.history_url(points);
        tracing::debug!(%url, "fetching history");
        self.get_json(&url).await
    }
}
