#![allow(clippy::expect_used)]

use std::sync::Mutex;

use netwatch::application::config::AppConfig;
use netwatch::application::services::alert_feed::AlertFeed;
use netwatch::application::services::history::{HistoryBuffer, LIVE_LABEL};
use netwatch::application::services::monitor::MonitorService;
use netwatch::domain::detection::AnomalyDetector;
use netwatch::domain::entities::anomaly::AnomalyEvent;
use netwatch::domain::entities::fleet::FleetSummary;
use netwatch::domain::ports::notifier::{NotificationError, Notifier};
use netwatch::domain::ports::source::SourceError;
use netwatch::domain::value_objects::anomaly_settings::AnomalySettings;
use netwatch::domain::value_objects::device_status::DeviceStatus;
use netwatch::domain::value_objects::metric::Metric;
use netwatch::domain::value_objects::severity::Severity;
use netwatch::domain::value_objects::thresholds::ThresholdSet;
use netwatch::infrastructure::sources::create_device_source;
use netwatch::infrastructure::sources::file_source::FileDeviceSource;

const FIXTURE_TICKS: usize = 20;

fn fixture_path(name: &str) -> String {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

fn load_fixture(name: &str) -> FileDeviceSource {
    FileDeviceSource::load(&fixture_path(name)).expect("Failed to load fixture")
}

struct TrackingNotifier {
    events: Mutex<Vec<AnomalyEvent>>,
}

impl TrackingNotifier {
    fn new() -> Self {
        Self {
            events: Mutex::new(vec![]),
        }
    }

    fn events(&self) -> Vec<AnomalyEvent> {
        self.events.lock().expect("mutex poisoned").clone()
    }
}

impl Notifier for TrackingNotifier {
    fn notify(&self, event: &AnomalyEvent) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("mutex poisoned")
            .push(event.clone());
        Ok(())
    }
}

fn make_service<'a>(
    source: &'a FileDeviceSource,
    notifier: &'a TrackingNotifier,
    max_alerts: usize,
) -> MonitorService<'a> {
    MonitorService::new(
        source,
        notifier,
        AnomalyDetector::new(AnomalySettings::default(), ThresholdSet::default()),
        AlertFeed::new(max_alerts),
        HistoryBuffer::new(24),
    )
}

#[test]
fn fixture_has_expected_shape() {
    let source = load_fixture("replay_spike.json");
    assert_eq!(source.tick_count(), FIXTURE_TICKS);
    assert_eq!(source.remaining(), FIXTURE_TICKS);
}

#[tokio::test]
async fn replay_fixture_end_to_end() {
    let source = load_fixture("replay_spike.json");
    let notifier = TrackingNotifier::new();
    let service = make_service(&source, &notifier, 5);

    let mut last = None;
    for _ in 0..FIXTURE_TICKS {
        last = Some(service.run_once().await.expect("cycle failed"));
    }
    let last = last.expect("at least one tick");

    // Only the final tick is anomalous: router CPU, then switch latency.
    let events = notifier.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events, last.anomalies);

    assert_eq!(events[0].device_name, "core-router-01");
    assert_eq!(events[0].metric, Metric::Cpu);
    assert_eq!(events[0].severity, Severity::Critical);
    assert_eq!(events[0].timestamp.to_rfc3339(), "2024-06-01T10:19:00+00:00");

    assert_eq!(events[1].device_name, "access-switch-02");
    assert_eq!(events[1].metric, Metric::Latency);
    assert_eq!(events[1].severity, Severity::Warning);

    assert_eq!(service.alert_feed().await, events);
    assert_eq!(service.tracked_devices().await, 2);
}

#[tokio::test]
async fn statuses_are_filled_and_summarised() {
    let source = load_fixture("replay_spike.json");
    let notifier = TrackingNotifier::new();
    let service = make_service(&source, &notifier, 5);

    let first = service.run_once().await.expect("cycle failed");
    assert!(first
        .devices
        .iter()
        .all(|d| d.status == Some(DeviceStatus::Online)));

    let mut last = first;
    for _ in 1..FIXTURE_TICKS {
        last = service.run_once().await.expect("cycle failed");
    }
    assert_eq!(last.devices[0].status, Some(DeviceStatus::Critical));
    assert_eq!(last.devices[1].status, Some(DeviceStatus::Online));

    let summary = FleetSummary::from_devices(&last.devices, service.alert_feed().await.len());
    assert_eq!(summary.total, 2);
    assert_eq!(summary.online, 1);
    assert_eq!(summary.critical, 1);
    assert_eq!(summary.health_percent, 50);
    assert_eq!(summary.avg_latency_ms, 18);
    assert_eq!(summary.total_bandwidth_mbps, 800);
    assert_eq!(summary.active_alerts, 2);
}

#[tokio::test]
async fn feed_is_capped_but_every_event_is_notified() {
    let source = load_fixture("replay_spike.json");
    let notifier = TrackingNotifier::new();
    let service = make_service(&source, &notifier, 1);

    for _ in 0..FIXTURE_TICKS {
        service.run_once().await.expect("cycle failed");
    }

    let feed = service.alert_feed().await;
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].device_name, "core-router-01");
    assert_eq!(notifier.events().len(), 2);
}

#[tokio::test]
async fn history_tracks_fleet_averages() {
    let source = load_fixture("replay_spike.json");
    let notifier = TrackingNotifier::new();
    let service = make_service(&source, &notifier, 5);

    for _ in 0..FIXTURE_TICKS {
        service.run_once().await.expect("cycle failed");
    }

    let history = service.history().await;
    assert_eq!(history.len(), FIXTURE_TICKS);
    let latest = history.last().expect("latest point");
    assert_eq!(latest.label, LIVE_LABEL);
    assert!((latest.cpu - 62.5).abs() < 1e-9);
    assert!((latest.latency - 17.5).abs() < 1e-9);
    assert!((latest.bandwidth - 400.0).abs() < 1e-9);
}

#[tokio::test]
async fn exhausted_replay_surfaces_source_error() {
    let source = load_fixture("replay_spike.json");
    let notifier = TrackingNotifier::new();
    let service = make_service(&source, &notifier, 5);

    for _ in 0..FIXTURE_TICKS {
        service.run_once().await.expect("cycle failed");
    }

    let err = service.run_once().await.expect_err("replay should be exhausted");
    assert!(matches!(
        err.downcast_ref::<SourceError>(),
        Some(SourceError::Exhausted(FIXTURE_TICKS))
    ));
    // A failed fetch leaves the feed from the last good pass.
    assert_eq!(service.alert_feed().await.len(), 2);
}

#[tokio::test]
async fn config_selects_replay_source() {
    let mut config = AppConfig::default();
    config.source.api_base_url = Some("http://127.0.0.1:9".to_string());
    config.source.replay_file = Some(fixture_path("replay_spike.json"));

    let source = create_device_source(&config.source).expect("source");
    let devices = source.fetch_devices().await.expect("first tick");
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].hostname, "core-router-01");
}

#[test]
fn thresholds_from_config_drive_status() {
    let mut config = AppConfig::default();
    config.thresholds.cpu_crit = 99.0;
    let thresholds = ThresholdSet::from(&config.thresholds);

    assert_eq!(DeviceStatus::derive(95.0, 10.0, &thresholds), DeviceStatus::Warning);
    assert_eq!(
        DeviceStatus::derive(95.0, 10.0, &ThresholdSet::default()),
        DeviceStatus::Critical
    );
}
