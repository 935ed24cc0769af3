#![allow(clippy::expect_used)]

use chrono::{TimeZone, Utc};
use netwatch::domain::detection::{AnomalyDetector, DetectionError};
use netwatch::domain::entities::snapshot::DeviceSnapshot;
use netwatch::domain::value_objects::anomaly_settings::AnomalySettings;
use netwatch::domain::value_objects::device_status::DeviceStatus;
use netwatch::domain::value_objects::metric::Metric;
use netwatch::domain::value_objects::severity::Severity;
use netwatch::domain::value_objects::thresholds::ThresholdSet;

fn make_snapshot(cpu: f64, memory: f64, latency: f64, bandwidth: f64) -> DeviceSnapshot {
    DeviceSnapshot {
        id: 7,
        hostname: "dist-switch-07".to_string(),
        ip: "10.20.0.7".to_string(),
        status: Some(DeviceStatus::Online),
        cpu,
        memory,
        latency,
        bandwidth,
        updated_at: None,
    }
}

fn detector() -> AnomalyDetector {
    AnomalyDetector::new(AnomalySettings::default(), ThresholdSet::default())
}

/// Feed 19 quiet ticks where only `metric` alternates `high`/`low`.
fn warm_up(detector: &mut AnomalyDetector, metric: Metric, high: f64, low: f64) {
    for i in 0..19 {
        let value = if i % 2 == 0 { high } else { low };
        let snapshot = with_metric(metric, value);
        let events = detector
            .record_and_evaluate(7, &snapshot)
            .expect("valid snapshot");
        assert!(events.is_empty(), "warm-up tick {i} flagged: {events:?}");
    }
}

fn with_metric(metric: Metric, value: f64) -> DeviceSnapshot {
    let mut s = make_snapshot(40.0, 50.0, 10.0, 400.0);
    match metric {
        Metric::Cpu => s.cpu = value,
        Metric::Memory => s.memory = value,
        Metric::Latency => s.latency = value,
        Metric::Bandwidth => s.bandwidth = value,
    }
    s
}

#[test]
fn cpu_spike_is_critical() {
    let mut d = detector();
    warm_up(&mut d, Metric::Cpu, 41.0, 39.0);

    let events = d
        .record_and_evaluate(7, &with_metric(Metric::Cpu, 95.0))
        .expect("valid snapshot");

    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.metric, Metric::Cpu);
    assert_eq!(event.severity, Severity::Critical);
    assert!((event.z_score - 4.345).abs() < 0.01, "z = {}", event.z_score);
    assert_eq!(event.confidence, 87);
    assert_eq!(event.unit, "%");
    assert_eq!(event.device_name, "dist-switch-07");
    assert_eq!(event.device_ip, "10.20.0.7");
    assert!(event.message.contains("above mean"));
    assert_eq!(event.prediction, Severity::Critical.prediction());
}

#[test]
fn latency_spike_under_critical_level_is_warning() {
    let mut d = detector();
    warm_up(&mut d, Metric::Latency, 11.0, 9.0);

    let events = d
        .record_and_evaluate(7, &with_metric(Metric::Latency, 30.0))
        .expect("valid snapshot");

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].metric, Metric::Latency);
    assert_eq!(events[0].severity, Severity::Warning);
    assert_eq!(events[0].unit, "ms");
}

#[test]
fn bandwidth_is_never_critical() {
    let mut d = detector();
    warm_up(&mut d, Metric::Bandwidth, 410.0, 390.0);

    let events = d
        .record_and_evaluate(7, &with_metric(Metric::Bandwidth, 9000.0))
        .expect("valid snapshot");

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].metric, Metric::Bandwidth);
    assert_eq!(events[0].severity, Severity::Warning);
}

#[test]
fn drop_is_flagged_with_the_fixed_message() {
    let mut d = detector();
    warm_up(&mut d, Metric::Cpu, 41.0, 39.0);

    let events = d
        .record_and_evaluate(7, &with_metric(Metric::Cpu, 0.0))
        .expect("valid snapshot");

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].severity, Severity::Warning);
    assert!(events[0].message.starts_with("Cpu is 0.0% \u{2014} Z-score "));
    assert!(events[0].message.ends_with("\u{3c3} above mean)"));
}

#[test]
fn simultaneous_spikes_follow_metric_order() {
    let mut d = detector();
    for i in 0..19 {
        let (a, b) = if i % 2 == 0 { (41.0, 11.0) } else { (39.0, 9.0) };
        let events = d
            .record_and_evaluate(7, &make_snapshot(a, a, b, 400.0))
            .expect("valid snapshot");
        assert!(events.is_empty());
    }

    let events = d
        .record_and_evaluate(7, &make_snapshot(95.0, 95.0, 60.0, 400.0))
        .expect("valid snapshot");

    let metrics: Vec<Metric> = events.iter().map(|e| e.metric).collect();
    assert_eq!(metrics, vec![Metric::Cpu, Metric::Memory, Metric::Latency]);
    assert!(events.iter().all(|e| e.severity == Severity::Critical));
}

#[test]
fn identical_input_gives_identical_output() {
    let stamp = Utc
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let mut first = detector();
    let mut second = detector();

    let mut all_first = Vec::new();
    let mut all_second = Vec::new();
    for i in 0..30 {
        let cpu = if i == 25 { 97.0 } else { 40.0 + f64::from(i % 3) };
        let mut snapshot = make_snapshot(cpu, 50.0, 10.0, 400.0);
        snapshot.updated_at = Some(stamp);
        all_first.extend(first.record_and_evaluate(7, &snapshot).expect("valid"));
        all_second.extend(second.record_and_evaluate(7, &snapshot).expect("valid"));
    }

    assert!(!all_first.is_empty());
    assert_eq!(all_first, all_second);
    assert_eq!(all_first[0].timestamp, stamp);
}

#[test]
fn window_keeps_only_the_newest_samples() {
    let mut d = detector();
    for i in 0..25 {
        d.record_and_evaluate(7, &with_metric(Metric::Memory, f64::from(i)))
            .expect("valid snapshot");
    }

    let window = d.window(7, Metric::Memory).expect("tracked device");
    assert_eq!(window.len(), 20);
    assert!((window[0] - 5.0).abs() < f64::EPSILON);
    assert!((window[19] - 24.0).abs() < f64::EPSILON);
}

#[test]
fn devices_have_independent_windows() {
    let mut d = detector();
    warm_up(&mut d, Metric::Cpu, 41.0, 39.0);

    // A fresh device spiking on its first sample has no history to compare against.
    let mut other = with_metric(Metric::Cpu, 95.0);
    other.id = 8;
    let events = d.record_and_evaluate(8, &other).expect("valid snapshot");

    assert!(events.is_empty());
    assert_eq!(d.device_count(), 2);
    assert_eq!(d.window(8, Metric::Cpu).map(|w| w.len()), Some(1));
}

#[test]
fn non_finite_sample_is_rejected_without_side_effects() {
    let mut d = detector();
    let mut bad = make_snapshot(40.0, 50.0, 10.0, 400.0);
    bad.bandwidth = f64::INFINITY;

    let err = d.record_and_evaluate(7, &bad).expect_err("should reject");

    assert_eq!(
        err,
        DetectionError::InvalidSample {
            device_id: 7,
            metric: Metric::Bandwidth
        }
    );
    assert_eq!(d.device_count(), 0);
    assert!(d.window(7, Metric::Cpu).is_none());
}

#[test]
fn flat_feed_of_inexact_values_never_flags() {
    let settings = AnomalySettings {
        window_size: 20,
        z_threshold: 1.0,
    };
    let mut d = AnomalyDetector::new(settings, ThresholdSet::default());

    for _ in 0..25 {
        let events = d
            .record_and_evaluate(7, &make_snapshot(0.1, 0.3, 2.2, 99.9))
            .expect("valid snapshot");
        assert!(events.is_empty(), "flat feed flagged: {events:?}");
    }
    assert_eq!(d.window(7, Metric::Cpu).map(|w| w.len()), Some(20));
}

#[test]
fn custom_threshold_changes_sensitivity() {
    let settings = AnomalySettings {
        window_size: 20,
        z_threshold: 5.0,
    };
    let mut d = AnomalyDetector::new(settings, ThresholdSet::default());
    warm_up(&mut d, Metric::Cpu, 41.0, 39.0);

    // z ~= 4.35 stays under a 5.0 threshold.
    let events = d
        .record_and_evaluate(7, &with_metric(Metric::Cpu, 95.0))
        .expect("valid snapshot");
    assert!(events.is_empty());
}
