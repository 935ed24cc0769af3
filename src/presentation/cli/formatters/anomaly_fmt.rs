use colored::Colorize;

use crate::domain::entities::anomaly::AnomalyEvent;
use crate::infrastructure::notifications::terminal::{sanitize, severity_badge};

/// Two-line rendering of one anomaly.
#[must_use]
pub fn format_anomaly(event: &AnomalyEvent) -> String {
    format!(
        "{} {} {} {}\n  {} {}",
        severity_badge(event.severity),
        event.timestamp.format("%H:%M:%S").to_string().dimmed(),
        sanitize(&event.device_name).bold(),
        format!("({})", sanitize(&event.device_ip)).dimmed(),
        sanitize(&event.message),
        format!("[{}%] {}", event.confidence, event.prediction).dimmed()
    )
}

pub fn format_anomalies(events: &[AnomalyEvent]) {
    for event in events {
        println!();
        println!("{}", format_anomaly(event));
    }
    println!();
}

pub fn print_no_anomalies() {
    println!();
    println!("{}", "✅ Fleet nominal: no anomalies detected".green().bold());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::metric::Metric;
    use crate::domain::value_objects::severity::Severity;
    use chrono::{TimeZone, Utc};
    use colored::control;

    fn disable_colors() {
        control::set_override(false);
    }

    fn make_event(severity: Severity) -> AnomalyEvent {
        AnomalyEvent {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 14, 3, 9).single().unwrap_or_default(),
            severity,
            device_name: "core-router-01".to_string(),
            device_ip: "192.168.1.1".to_string(),
            metric: Metric::Cpu,
            value: 95.0,
            unit: "%".to_string(),
            z_score: 4.35,
            message: "Cpu is 95.0% \u{2014} Z-score 4.35 (4.3\u{3c3} above mean)".to_string(),
            prediction: severity.prediction().to_string(),
            confidence: 87,
        }
    }

    #[test]
    fn format_anomaly_contains_all_parts() {
        disable_colors();
        let text = format_anomaly(&make_event(Severity::Critical));
        assert!(text.contains("14:03:09"));
        assert!(text.contains("core-router-01 (192.168.1.1)"));
        assert!(text.contains("Z-score 4.35"));
        assert!(text.contains("[87%] Immediate intervention may be required"));
    }

    #[test]
    fn format_anomaly_strips_escape_sequences() {
        disable_colors();
        let mut event = make_event(Severity::Warning);
        event.device_name = "bad\x1b]0;titlehost".to_string();
        assert!(!format_anomaly(&event).contains('\x1b'));
    }

    #[test]
    fn format_anomalies_does_not_panic() {
        disable_colors();
        format_anomalies(&[make_event(Severity::Critical), make_event(Severity::Warning)]);
        format_anomalies(&[]);
        print_no_anomalies();
    }
}
