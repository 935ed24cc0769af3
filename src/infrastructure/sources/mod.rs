pub mod file_source;
pub mod http_source;

use anyhow::{bail, Context};

use crate::application::config::SourceConfig;
use crate::domain::ports::DeviceSource;

use self::file_source::FileDeviceSource;
use self::http_source::HttpDeviceSource;

/// Create the device source selected by configuration.
///
/// A replay file takes precedence over the HTTP backend.
///
/// # Errors
///
/// Returns an error if neither source is configured or the chosen one
/// cannot be initialized.
pub fn create_device_source(config: &SourceConfig) -> anyhow::Result<Box<dyn DeviceSource>> {
    if let Some(path) = config.replay_file.as_deref().filter(|p| !p.trim().is_empty()) {
        let source = FileDeviceSource::load(path).context("Failed to load replay file")?;
        return Ok(Box::new(source));
    }
    if let Some(url) = config.api_base_url.as_deref().filter(|u| !u.trim().is_empty()) {
        let source = HttpDeviceSource::new(url).context("Failed to create HTTP device source")?;
        return Ok(Box::new(source));
    }
    bail!("No device source configured: set source.api_base_url or source.replay_file")
}
