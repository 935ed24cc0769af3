use colored::Colorize;
use serde::Serialize;

use super::is_exhausted;
use crate::application::services::monitor::MonitorService;
use crate::domain::entities::anomaly::AnomalyEvent;
use crate::domain::entities::fleet::FleetSummary;
use crate::domain::entities::history::HistoryPoint;
use crate::domain::value_objects::severity::Severity;
use crate::presentation::cli::formatters::anomaly_fmt::{format_anomalies, print_no_anomalies};
use crate::presentation::cli::formatters::status_fmt::{format_fleet_summary, print_section_header};

/// Outcome of replaying every tick of a recording.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub ticks: usize,
    pub devices_skipped: usize,
    /// Every anomaly of the run, in emission order.
    pub anomalies: Vec<AnomalyEvent>,
    /// Alert feed as left by the final tick.
    pub alert_feed: Vec<AnomalyEvent>,
    pub history: Vec<HistoryPoint>,
    /// Fleet view of the final tick, absent for an empty recording.
    pub summary: Option<FleetSummary>,
}

impl ReplayReport {
    #[must_use]
    pub fn critical_count(&self) -> usize {
        self.anomalies
            .iter()
            .filter(|e| e.severity == Severity::Critical)
            .count()
    }
}

/// Drive the service until its source runs out of ticks.
///
/// # Errors
///
/// Returns an error if a tick fails for any reason other than exhaustion,
/// or if JSON serialization fails.
pub async fn run_replay(service: &MonitorService<'_>, json: bool) -> anyhow::Result<ReplayReport> {
    let mut report = ReplayReport::default();

    loop {
        let result = match service.run_once().await {
            Ok(result) => result,
            Err(e) if is_exhausted(&e) => break,
            Err(e) => return Err(e),
        };
        report.ticks += 1;
        report.devices_skipped += result.devices_skipped;

        if !json && !result.anomalies.is_empty() {
            print_section_header(&format!("\nTick {}", report.ticks));
            format_anomalies(&result.anomalies);
        }

        let active = service.alert_feed().await.len();
        report.summary = Some(FleetSummary::from_devices(&result.devices, active));
        report.anomalies.extend(result.anomalies);
    }

    report.alert_feed = service.alert_feed().await;
    report.history = service.history().await;
    tracing::info!(
        ticks = report.ticks,
        anomalies = report.anomalies.len(),
        "Replay complete"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(report);
    }

    if report.anomalies.is_empty() {
        print_no_anomalies();
    }
    println!(
        "{}",
        format!(
            "Replayed {} tick(s): {} anomaly event(s), {} critical, {} sample(s) skipped",
            report.ticks,
            report.anomalies.len(),
            report.critical_count(),
            report.devices_skipped
        )
        .bold()
    );
    if let Some(ref summary) = report.summary {
        println!("{}", format_fleet_summary(summary));
    }

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::application::services::alert_feed::AlertFeed;
    use crate::application::services::history::HistoryBuffer;
    use crate::domain::detection::detector::AnomalyDetector;
    use crate::domain::entities::snapshot::DeviceSnapshot;
    use crate::domain::ports::notifier::Notifier;
    use crate::domain::value_objects::anomaly_settings::AnomalySettings;
    use crate::domain::value_objects::metric::Metric;
    use crate::domain::value_objects::thresholds::ThresholdSet;
    use crate::infrastructure::notifications::composite::CompositeNotifier;
    use crate::infrastructure::sources::file_source::FileDeviceSource;
    use std::path::PathBuf;

    fn device(id: u32, cpu: f64) -> DeviceSnapshot {
        DeviceSnapshot {
            id,
            hostname: format!("core-{id}"),
            ip: format!("172.16.0.{id}"),
            status: None,
            cpu,
            memory: 55.0,
            latency: 12.0,
            bandwidth: 800.0,
            updated_at: None,
        }
    }

    fn spike_ticks() -> Vec<Vec<DeviceSnapshot>> {
        let mut ticks: Vec<Vec<DeviceSnapshot>> = (0..19)
            .map(|i| vec![device(1, if i % 2 == 0 { 41.0 } else { 39.0 })])
            .collect();
        ticks.push(vec![device(1, 95.0)]);
        ticks
    }

    async fn replay(ticks: Vec<Vec<DeviceSnapshot>>) -> ReplayReport {
        colored::control::set_override(false);
        let source = FileDeviceSource::from_ticks(PathBuf::from("inline.json"), ticks);
        let notifier = CompositeNotifier::new(Vec::<Box<dyn Notifier>>::new());
        let service = MonitorService::new(
            &source,
            &notifier,
            AnomalyDetector::new(AnomalySettings::default(), ThresholdSet::default()),
            AlertFeed::new(5),
            HistoryBuffer::new(24),
        );
        run_replay(&service, true).await.expect("replay failed")
    }

    #[tokio::test]
    async fn spike_is_reported_once() {
        let report = replay(spike_ticks()).await;

        assert_eq!(report.ticks, 20);
        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.critical_count(), 1);
        let event = &report.anomalies[0];
        assert_eq!(event.metric, Metric::Cpu);
        assert_eq!(event.device_name, "core-1");
        assert_eq!(report.alert_feed.len(), 1);
    }

    #[tokio::test]
    async fn summary_reflects_last_tick() {
        let report = replay(spike_ticks()).await;

        let summary = report.summary.expect("summary");
        assert_eq!(summary.total, 1);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.active_alerts, 1);
        assert_eq!(report.history.len(), 20);
    }

    #[tokio::test]
    async fn json_report_uses_camel_case_throughout() {
        let report = replay(spike_ticks()).await;
        let json = serde_json::to_value(&report).expect("serialize");

        assert_eq!(json["alertFeed"][0]["deviceName"], "core-1");
        assert!(json["anomalies"][0]["zScore"].as_f64().is_some());
        assert_eq!(json["summary"]["healthPercent"], 0);
        assert_eq!(json["history"][0]["time"], "now");
        assert!(json["anomalies"][0].get("device_name").is_none());
    }

    #[tokio::test]
    async fn empty_recording_yields_empty_report() {
        let report = replay(vec![]).await;

        assert_eq!(report.ticks, 0);
        assert!(report.anomalies.is_empty());
        assert!(report.summary.is_none());
    }

    #[tokio::test]
    async fn invalid_samples_are_counted() {
        let mut bad = device(2, 20.0);
        bad.latency = f64::NAN;
        let report = replay(vec![vec![device(1, 20.0), bad]]).await;

        assert_eq!(report.ticks, 1);
        assert_eq!(report.devices_skipped, 1);
    }
}
