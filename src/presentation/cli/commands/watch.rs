use std::time::Duration;

use colored::Colorize;

use super::is_exhausted;
use crate::application::services::monitor::MonitorService;
use crate::domain::entities::fleet::FleetSummary;
use crate::presentation::cli::formatters::status_fmt::format_fleet_summary;

/// Run the polling loop at the configured interval.
///
/// Seeds the chart history once, then polls until Ctrl+C or until a replay
/// source is exhausted. Errors during individual cycles are logged and the
/// loop keeps going.
///
/// Returns the number of completed cycles.
///
/// # Errors
///
/// Cycle failures are logged, never returned.
pub async fn run_watch(service: &MonitorService<'_>, interval_ms: u64) -> anyhow::Result<usize> {
    let interval_ms = interval_ms.max(1);
    match service.seed_history().await {
        Ok(points) => tracing::debug!(points, "History seeded"),
        Err(e) => tracing::warn!("History unavailable, starting empty: {e:#}"),
    }

    tracing::info!("Watching fleet (interval: {interval_ms}ms)");
    let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut cycles = 0usize;
    loop {
        tokio::select! {
            _ = interval.tick() => {
                match service.run_once().await {
                    Ok(result) => {
                        cycles += 1;
                        let active = service.alert_feed().await.len();
                        let summary = FleetSummary::from_devices(&result.devices, active);
                        println!("{}", format_fleet_summary(&summary));
                        tracing::info!(
                            polled = result.devices_polled,
                            skipped = result.devices_skipped,
                            "Cycle complete: {} anomaly event(s)",
                            result.anomalies.len()
                        );
                    }
                    Err(e) if is_exhausted(&e) => {
                        tracing::info!("Replay finished after {cycles} cycle(s)");
                        break;
                    }
                    Err(e) => {
                        tracing::error!("Monitoring cycle failed: {e:#}");
                    }
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received");
                println!("\n{}", "Stopping netwatch...".dimmed());
                break;
            }
        }
    }
    Ok(cycles)
}
