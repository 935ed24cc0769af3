use colored::{ColoredString, Colorize};

use crate::domain::entities::fleet::FleetSummary;
use crate::domain::value_objects::device_status::DeviceStatus;

#[must_use]
pub fn progress_bar(value: f64, width: usize) -> String {
    let ratio = (value / 100.0).clamp(0.0, 1.0);
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_filled = "█".repeat(filled);
    let bar_empty = "░".repeat(empty);

    let colored_bar = if value >= 90.0 {
        bar_filled.red().bold()
    } else if value >= 70.0 {
        bar_filled.yellow()
    } else {
        bar_filled.green()
    };

    format!("{colored_bar}{bar_empty}")
}

/// Color `text` by where `value` sits against its warning/critical levels
/// (strictly above).
#[must_use]
pub fn colorize_level(text: &str, value: f64, warning: f64, critical: f64) -> ColoredString {
    if value > critical {
        text.red().bold()
    } else if value > warning {
        text.yellow()
    } else {
        text.green()
    }
}

#[must_use]
pub fn status_badge(status: DeviceStatus) -> ColoredString {
    let label = format!("{:<8}", status.to_string());
    match status {
        DeviceStatus::Online => label.green(),
        DeviceStatus::Warning => label.yellow().bold(),
        DeviceStatus::Critical => label.red().bold(),
    }
}

/// One-line fleet health summary.
#[must_use]
pub fn format_fleet_summary(summary: &FleetSummary) -> String {
    let health = format!("{}%", summary.health_percent);
    let health = if summary.critical > 0 {
        health.red().bold()
    } else if summary.warning > 0 {
        health.yellow()
    } else {
        health.green()
    };
    format!(
        "Health {health} ({}/{} online) | Alerts {} | Avg latency {}ms | Bandwidth {} Mbps",
        summary.online,
        summary.total,
        summary.active_alerts,
        summary.avg_latency_ms,
        summary.total_bandwidth_mbps
    )
}

pub fn print_section_header(title: &str) {
    println!("{}", title.bold().cyan());
    let display_width = title.chars().count();
    println!("{}", "─".repeat(display_width).cyan());
}
