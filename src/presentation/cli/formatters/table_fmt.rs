use crate::domain::entities::snapshot::DeviceSnapshot;
use crate::domain::value_objects::device_status::DeviceStatus;
use crate::domain::value_objects::metric::Metric;
use crate::domain::value_objects::thresholds::ThresholdSet;

use super::status_fmt::{colorize_level, status_badge};

/// Formats devices in source order as an aligned table.
///
/// Devices without a reported status get one derived from `thresholds`.
#[must_use]
pub fn format_device_table(devices: &[DeviceSnapshot], thresholds: &ThresholdSet) -> String {
    let header = format!(
        "{:<5} {:<20} {:<16} {:<8} {:>8} {:>8} {:>10} {:>12}",
        "ID", "HOSTNAME", "IP", "STATUS", "CPU", "MEM", "LATENCY", "BANDWIDTH"
    );
    let separator = "─".repeat(header.chars().count());

    let mut rows = vec![header, separator];

    for d in devices {
        let hostname: String = d.hostname.chars().take(19).collect();
        let ip: String = d.ip.chars().take(15).collect();
        let status = d
            .status
            .unwrap_or_else(|| DeviceStatus::derive(d.cpu, d.memory, thresholds));
        rows.push(format!(
            "{:<5} {:<20} {:<16} {} {} {} {} {:>12}",
            d.id,
            hostname,
            ip,
            status_badge(status),
            metric_cell(d, Metric::Cpu, 8, thresholds),
            metric_cell(d, Metric::Memory, 8, thresholds),
            metric_cell(d, Metric::Latency, 10, thresholds),
            format!("{:.1}Mbps", d.bandwidth),
        ));
    }

    rows.join("\n")
}

/// Right-aligned reading colored by the metric's warning/critical levels.
fn metric_cell(
    device: &DeviceSnapshot,
    metric: Metric,
    width: usize,
    thresholds: &ThresholdSet,
) -> String {
    let value = device.value(metric);
    // Pad before coloring so escape codes do not skew the columns.
    let text = format!("{:>width$}", format!("{value:.1}{}", metric.unit()));
    let warning = thresholds.warning_for(metric).unwrap_or(f64::INFINITY);
    let critical = thresholds.critical_for(metric).unwrap_or(f64::INFINITY);
    colorize_level(&text, value, warning, critical).to_string()
}
