use std::borrow::Cow;

use colored::Colorize;

use crate::domain::entities::anomaly::AnomalyEvent;
use crate::domain::ports::notifier::{NotificationError, Notifier};
use crate::domain::value_objects::severity::Severity;

const SEPARATOR_WIDTH: usize = 70;

/// Prints each anomaly as a framed block on stdout.
pub struct TerminalNotifier {
    show_prediction: bool,
}

impl TerminalNotifier {
    #[must_use]
    pub const fn new(show_prediction: bool) -> Self {
        Self { show_prediction }
    }

    fn render(&self, event: &AnomalyEvent) -> String {
        let separator = "\u{2500}".repeat(SEPARATOR_WIDTH).dimmed().to_string();
        let title = format!(
            "{} ({})",
            sanitize(&event.device_name),
            sanitize(&event.device_ip)
        );

        let mut lines = vec![
            separator.clone(),
            format!("{} {}", severity_badge(event.severity), title.bold()),
            format!(
                "{}  {}",
                sanitize(&event.message),
                format!("[{}% confidence]", event.confidence).dimmed()
            ),
        ];
        if self.show_prediction {
            lines.push(format!("\u{2192} {}", sanitize(&event.prediction)).cyan().to_string());
        }
        lines.push(separator);
        lines.join("\n")
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, event: &AnomalyEvent) -> Result<(), NotificationError> {
        println!("{}", self.render(event));
        Ok(())
    }
}

/// Strip ANSI escape sequences and C0 control characters from a string,
/// preserving only printable content, newlines, and tabs.
pub(crate) fn sanitize(s: &str) -> Cow<'_, str> {
    if s.bytes()
        .any(|b| matches!(b, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F))
    {
        Cow::Owned(
            s.chars()
                .filter(|&c| !matches!(c as u32, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F))
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    }
}

#[must_use]
pub(crate) fn severity_badge(severity: Severity) -> String {
    let label = format!(" {} {} ", severity.emoji(), severity.to_string().to_uppercase());
    match severity {
        Severity::Critical => label.on_red().white().bold().to_string(),
        Severity::Warning => label.on_yellow().black().bold().to_string(),
    }
}
