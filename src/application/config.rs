use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::value_objects::anomaly_settings::AnomalySettings;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::thresholds::ThresholdSet;

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub anomaly: AnomalyConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// General settings: polling cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_polling_interval")]
    pub polling_interval_ms: u64,
}

/// Where device snapshots come from: an HTTP backend or a replay file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub replay_file: Option<String>,
}

/// Z-score detector tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyConfig {
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default = "default_z_threshold")]
    pub z_threshold: f64,
}

/// Per-metric warning/critical levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_cpu_warn")]
    pub cpu_warn: f64,
    #[serde(default = "default_cpu_crit")]
    pub cpu_crit: f64,
    #[serde(default = "default_memory_warn")]
    pub memory_warn: f64,
    #[serde(default = "default_memory_crit")]
    pub memory_crit: f64,
    #[serde(default = "default_latency_warn")]
    pub latency_warn: f64,
    #[serde(default = "default_latency_crit")]
    pub latency_crit: f64,
}

/// Consumer-side display caps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_max_alerts")]
    pub max_alerts: usize,
    #[serde(default = "default_history_length")]
    pub history_length: usize,
}

/// Notification channels: terminal, desktop, log file, webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_true")]
    pub terminal: bool,
    #[serde(default)]
    pub desktop: bool,
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub webhook_min_severity: Option<Severity>,
}

// --- Defaults ---

const fn default_polling_interval() -> u64 {
    3000
}

const fn default_window_size() -> usize {
    20
}

const fn default_z_threshold() -> f64 {
    2.5
}

const fn default_cpu_warn() -> f64 {
    75.0
}

const fn default_cpu_crit() -> f64 {
    85.0
}

const fn default_memory_warn() -> f64 {
    80.0
}

const fn default_memory_crit() -> f64 {
    90.0
}

const fn default_latency_warn() -> f64 {
    20.0
}

const fn default_latency_crit() -> f64 {
    35.0
}

const fn default_max_alerts() -> usize {
    5
}

const fn default_history_length() -> usize {
    24
}

const fn default_true() -> bool {
    true
}

// --- Default impls ---

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            polling_interval_ms: default_polling_interval(),
        }
    }
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            z_threshold: default_z_threshold(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            cpu_warn: default_cpu_warn(),
            cpu_crit: default_cpu_crit(),
            memory_warn: default_memory_warn(),
            memory_crit: default_memory_crit(),
            latency_warn: default_latency_warn(),
            latency_crit: default_latency_crit(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_alerts: default_max_alerts(),
            history_length: default_history_length(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            terminal: default_true(),
            desktop: false,
            log_file: None,
            webhook_url: None,
            webhook_min_severity: None,
        }
    }
}

// --- Environment overrides ---

/// Environment variable overriding `general.polling_interval_ms`.
pub const ENV_POLLING_INTERVAL_MS: &str = "NETWATCH_POLLING_INTERVAL_MS";
/// Environment variable overriding `source.api_base_url`.
pub const ENV_API_BASE_URL: &str = "NETWATCH_API_BASE_URL";
/// Environment variable overriding `notifications.webhook_url`.
pub const ENV_ALERT_WEBHOOK_URL: &str = "NETWATCH_ALERT_WEBHOOK_URL";

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from default path or create default config file, then
    /// apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_or_create(&path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from a specific path, or create a default config file if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is invalid,
    /// or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Load from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to a specific path, creating parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = self.to_toml()?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Render the configuration as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Apply `NETWATCH_*` overrides read through `lookup`.
    ///
    /// Unparseable numbers are ignored with a warning; empty strings clear
    /// optional URLs.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_POLLING_INTERVAL_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => self.general.polling_interval_ms = ms,
                _ => tracing::warn!(
                    value = %raw,
                    "ignoring invalid {ENV_POLLING_INTERVAL_MS}"
                ),
            }
        }
        if let Some(url) = lookup(ENV_API_BASE_URL) {
            self.source.api_base_url = non_empty(url);
        }
        if let Some(url) = lookup(ENV_ALERT_WEBHOOK_URL) {
            self.notifications.webhook_url = non_empty(url);
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("netwatch").join("config.toml"))
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl From<&ThresholdConfig> for ThresholdSet {
    fn from(config: &ThresholdConfig) -> Self {
        // Percentages live in 0..=100; latency only needs to be non-negative.
        let cpu_warning = config.cpu_warn.clamp(0.0, 100.0);
        let cpu_critical = config.cpu_crit.clamp(0.0, 100.0);
        let memory_warning = config.memory_warn.clamp(0.0, 100.0);
        let memory_critical = config.memory_crit.clamp(0.0, 100.0);
        let latency_warning = config.latency_warn.max(0.0);
        let latency_critical = config.latency_crit.max(0.0);

        Self {
            cpu_warning,
            cpu_critical: cpu_critical.max(cpu_warning),
            memory_warning,
            memory_critical: memory_critical.max(memory_warning),
            latency_warning,
            latency_critical: latency_critical.max(latency_warning),
        }
    }
}

impl From<&AnomalyConfig> for AnomalySettings {
    fn from(config: &AnomalyConfig) -> Self {
        let defaults = Self::default();
        let z_threshold = if config.z_threshold.is_finite() && config.z_threshold > 0.0 {
            config.z_threshold
        } else {
            defaults.z_threshold
        };
        Self {
            // A Z-score needs at least two samples.
            window_size: config.window_size.max(2),
            z_threshold,
        }
    }
}
