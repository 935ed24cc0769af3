use notify_rust::{Notification, Timeout, Urgency};

use crate::domain::entities::anomaly::AnomalyEvent;
use crate::domain::ports::notifier::{NotificationError, Notifier};
use crate::domain::value_objects::severity::Severity;

const MAX_BODY_CHARS: usize = 250;
const MAX_SUMMARY_CHARS: usize = 100;

/// Desktop popups through the freedesktop notification server.
pub struct DesktopNotifier;

impl DesktopNotifier {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, event: &AnomalyEvent) -> Result<(), NotificationError> {
        let (summary, body) = popup_content(event);
        send_notification(&summary, &body, severity_to_urgency(event.severity))
    }
}

/// Summary and body text, markup-escaped and truncated.
fn popup_content(event: &AnomalyEvent) -> (String, String) {
    let raw_summary = format!(
        "{} netwatch \u{2014} {} {}",
        event.severity.emoji(),
        event.device_name,
        event.metric
    );
    let raw_body = format!(
        "{}\n\n{} ({}% confidence)",
        event.message, event.prediction, event.confidence
    );
    (
        truncate(&escape_markup(&raw_summary), MAX_SUMMARY_CHARS),
        truncate(&escape_markup(&raw_body), MAX_BODY_CHARS),
    )
}

fn send_notification(summary: &str, body: &str, urgency: Urgency) -> Result<(), NotificationError> {
    Notification::new()
        .summary(summary)
        .body(body)
        .urgency(urgency)
        .timeout(Timeout::Milliseconds(10_000))
        .show()
        .map_err(|_| {
            NotificationError::ChannelUnavailable(
                "desktop notification server unreachable".to_string(),
            )
        })?;

    Ok(())
}

#[must_use]
const fn severity_to_urgency(severity: Severity) -> Urgency {
    match severity {
        Severity::Critical => Urgency::Critical,
        Severity::Warning => Urgency::Normal,
    }
}

// Truncates on Unicode scalar values, not grapheme clusters.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_owned()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('\u{2026}');
        result
    }
}

fn escape_markup(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
