use std::time::Duration;

use serde_json::{json, Value};
use tracing::warn;

use crate::domain::entities::anomaly::AnomalyEvent;
use crate::domain::ports::notifier::{NotificationError, Notifier};
use crate::domain::value_objects::severity::Severity;

/// Webhook notification format, auto-detected from the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WebhookFormat {
    Slack,
    Discord,
    Generic,
}

/// Posts anomaly events to an HTTP webhook endpoint.
///
/// Supports Slack (colored attachments), Discord (embeds), and generic JSON
/// payloads. The format is auto-detected from the webhook URL.
///
/// Events below `min_severity` are dropped. HTTP errors are logged but never
/// propagated (best-effort delivery).
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
    min_severity: Severity,
}

impl WebhookNotifier {
    /// Creates a new webhook notifier targeting the given URL.
    ///
    /// The HTTP client is configured with a 5-second timeout covering
    /// DNS resolution, connection, and response.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::ChannelUnavailable` if the HTTP client
    /// cannot be initialized (e.g. TLS backend failure).
    pub fn new(url: String, min_severity: Severity) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| {
                NotificationError::ChannelUnavailable(format!("cannot build HTTP client: {e}"))
            })?;

        Ok(Self {
            url,
            client,
            min_severity,
        })
    }

    fn detect_format(&self) -> WebhookFormat {
        // Match on the host only so a path containing "slack" stays generic.
        let host = self
            .url
            .split("//")
            .nth(1)
            .and_then(|s| s.split('/').next())
            .and_then(|h| h.split(':').next())
            .unwrap_or("");

        if host == "hooks.slack.com" {
            WebhookFormat::Slack
        } else if host == "discord.com" || host == "discordapp.com" {
            WebhookFormat::Discord
        } else {
            WebhookFormat::Generic
        }
    }

    fn send_payload(&self, payload: &Value) {
        let result = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current()
                .block_on(self.client.post(&self.url).json(payload).send())
        });

        match result {
            Ok(resp) if resp.status().is_success() => {}
            Ok(resp) => warn!("Webhook HTTP {}", resp.status()),
            Err(e) => warn!("Webhook error: {e}"),
        }
    }

    const fn severity_color_hex(severity: Severity) -> &'static str {
        match severity {
            Severity::Warning => "#E67E22",
            Severity::Critical => "#E74C3C",
        }
    }

    const fn severity_color_decimal(severity: Severity) -> u32 {
        match severity {
            Severity::Warning => 0x00_E6_7E_22,
            Severity::Critical => 0x00_E7_4C_3C,
        }
    }

    fn title(event: &AnomalyEvent) -> String {
        format!(
            "{} {} anomaly on {}",
            event.severity.emoji(),
            event.metric.label(),
            event.device_name
        )
    }

    fn format_event(&self, event: &AnomalyEvent) -> Value {
        match self.detect_format() {
            WebhookFormat::Slack => Self::format_slack(event),
            WebhookFormat::Discord => Self::format_discord(event),
            WebhookFormat::Generic => Self::format_generic(event),
        }
    }

    fn format_slack(event: &AnomalyEvent) -> Value {
        json!({
            "attachments": [{
                "color": Self::severity_color_hex(event.severity),
                "blocks": [
                    {
                        "type": "header",
                        "text": {
                            "type": "plain_text",
                            "text": format!("netwatch \u{2014} {}", Self::title(event))
                        }
                    },
                    {
                        "type": "section",
                        "fields": [
                            { "type": "mrkdwn", "text": format!("*Severity:*\n{}", event.severity) },
                            { "type": "mrkdwn", "text": format!("*Device:*\n{} ({})", event.device_name, event.device_ip) },
                            { "type": "mrkdwn", "text": format!("*Confidence:*\n{}%", event.confidence) }
                        ]
                    },
                    {
                        "type": "section",
                        "text": {
                            "type": "mrkdwn",
                            "text": format!("{}\n_{}_", event.message, event.prediction)
                        }
                    }
                ]
            }]
        })
    }

    fn format_discord(event: &AnomalyEvent) -> Value {
        json!({
            "username": "netwatch",
            "embeds": [{
                "title": Self::title(event),
                "description": &event.message,
                "color": Self::severity_color_decimal(event.severity),
                "fields": [
                    { "name": "Severity", "value": event.severity.to_string(), "inline": true },
                    { "name": "Device", "value": format!("{} ({})", event.device_name, event.device_ip), "inline": true },
                    { "name": "Confidence", "value": format!("{}%", event.confidence), "inline": true },
                    { "name": "Outlook", "value": &event.prediction, "inline": false }
                ],
                "timestamp": event.timestamp.to_rfc3339()
            }]
        })
    }

    fn format_generic(event: &AnomalyEvent) -> Value {
        json!({
            "source": "netwatch",
            "type": "anomaly",
            "severity": event.severity.to_string(),
            "device": &event.device_name,
            "ip": &event.device_ip,
            "metric": event.metric.to_string(),
            "value": event.value,
            "unit": &event.unit,
            "zScore": event.z_score,
            "confidence": event.confidence,
            "message": &event.message,
            "prediction": &event.prediction,
            "timestamp": event.timestamp.to_rfc3339()
        })
    }
}

impl Notifier for WebhookNotifier {
    fn notify(&self, event: &AnomalyEvent) -> Result<(), NotificationError> {
        if event.severity < self.min_severity {
            return Ok(());
        }
        let payload = self.format_event(event);
        self.send_payload(&payload);
        Ok(())
    }
}
