use anyhow::Context;
use colored::Colorize;
use serde_json::json;

use crate::domain::entities::fleet::FleetSummary;
use crate::domain::ports::source::DeviceSource;
use crate::domain::value_objects::device_status::DeviceStatus;
use crate::domain::value_objects::thresholds::ThresholdSet;
use crate::presentation::cli::formatters::status_fmt::{
    format_fleet_summary, print_section_header, progress_bar,
};
use crate::presentation::cli::formatters::table_fmt::format_device_table;

/// Fetch the fleet once and print device status.
///
/// No anomaly detection runs here, so the active alert count is zero.
///
/// # Errors
///
/// Returns an error if the device source fails or JSON serialization fails.
pub async fn run_status(
    source: &dyn DeviceSource,
    thresholds: &ThresholdSet,
    json: bool,
) -> anyhow::Result<FleetSummary> {
    let mut devices = source
        .fetch_devices()
        .await
        .context("Failed to fetch device snapshots")?;

    for device in &mut devices {
        if device.status.is_none() {
            device.status = Some(DeviceStatus::derive(device.cpu, device.memory, thresholds));
        }
    }
    let summary = FleetSummary::from_devices(&devices, 0);

    if json {
        let payload = json!({ "summary": &summary, "devices": &devices });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(summary);
    }

    println!("{}", "netwatch — Fleet Status".bold().cyan());
    println!("{}", "━".repeat(50));

    print_section_header("\nHealth");
    println!(
        "  {} {}%",
        progress_bar(f64::from(summary.health_percent), 30),
        summary.health_percent
    );
    println!("  {}", format_fleet_summary(&summary));

    print_section_header("\nDevices");
    if devices.is_empty() {
        println!("  {}", "No devices reported".dimmed());
    } else {
        println!("{}", format_device_table(&devices, thresholds));
    }

    Ok(summary)
}
