use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use netwatch::application::config::AppConfig;
use netwatch::application::services::alert_feed::AlertFeed;
use netwatch::application::services::history::HistoryBuffer;
use netwatch::application::services::monitor::MonitorService;
use netwatch::domain::detection::detector::AnomalyDetector;
use netwatch::domain::ports::notifier::Notifier;
use netwatch::domain::value_objects::anomaly_settings::AnomalySettings;
use netwatch::domain::value_objects::severity::Severity;
use netwatch::domain::value_objects::thresholds::ThresholdSet;
use netwatch::infrastructure::notifications::composite::CompositeNotifier;
use netwatch::infrastructure::notifications::desktop::DesktopNotifier;
use netwatch::infrastructure::notifications::log_file::LogFileNotifier;
use netwatch::infrastructure::notifications::terminal::TerminalNotifier;
use netwatch::infrastructure::notifications::webhook::WebhookNotifier;
use netwatch::infrastructure::sources::create_device_source;
use netwatch::infrastructure::sources::file_source::FileDeviceSource;
use netwatch::presentation::cli::app::{Cli, Commands};
use netwatch::presentation::cli::commands::config::run_config;
use netwatch::presentation::cli::commands::replay::run_replay;
use netwatch::presentation::cli::commands::status::run_status;
use netwatch::presentation::cli::commands::watch::run_watch;

fn print_banner() {
    println!("{}", "━".repeat(40).cyan());
    println!("{}", "  NETWATCH — Fleet Anomaly Monitor".bold().cyan());
    println!("{}", "━".repeat(40).cyan());
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build_notifier(config: &AppConfig) -> CompositeNotifier {
    let channels = &config.notifications;
    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();

    if channels.terminal {
        notifiers.push(Box::new(TerminalNotifier::default()));
    }
    if channels.desktop {
        notifiers.push(Box::new(DesktopNotifier::new()));
    }
    if let Some(ref path) = channels.log_file {
        if path.trim().is_empty() {
            notifiers.push(Box::new(LogFileNotifier::default()));
        } else {
            notifiers.push(Box::new(LogFileNotifier::new(path)));
        }
    }
    if let Some(ref url) = channels.webhook_url {
        let min_severity = channels.webhook_min_severity.unwrap_or(Severity::Critical);
        match WebhookNotifier::new(url.clone(), min_severity) {
            Ok(webhook) => notifiers.push(Box::new(webhook)),
            Err(e) => tracing::warn!("Webhook disabled: {e}"),
        }
    }

    CompositeNotifier::new(notifiers)
}

fn build_detector(config: &AppConfig) -> AnomalyDetector {
    AnomalyDetector::new(
        AnomalySettings::from(&config.anomaly),
        ThresholdSet::from(&config.thresholds),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    // Load configuration
    let config = if let Some(ref path) = cli.config {
        let mut config = AppConfig::load_from(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config
    } else {
        AppConfig::load()?
    };

    // Manual DI: main.rs is the only place that knows concrete types
    match cli.command.unwrap_or(Commands::Watch { interval_ms: None }) {
        Commands::Watch { interval_ms } => {
            let source = create_device_source(&config.source)?;
            let notifier = build_notifier(&config);
            let service = MonitorService::new(
                &*source,
                &notifier,
                build_detector(&config),
                AlertFeed::new(config.display.max_alerts),
                HistoryBuffer::new(config.display.history_length),
            );
            print_banner();
            let interval = interval_ms.unwrap_or(config.general.polling_interval_ms);
            run_watch(&service, interval).await?;
        }
        Commands::Replay { file, json } => {
            let source = FileDeviceSource::load(&file.to_string_lossy())
                .context("Failed to load replay file")?;
            tracing::debug!(ticks = source.tick_count(), "Replaying {}", source.path().display());
            // Anomalies are printed by the replay report itself.
            let notifier = CompositeNotifier::default();
            let service = MonitorService::new(
                &source,
                &notifier,
                build_detector(&config),
                AlertFeed::new(config.display.max_alerts),
                HistoryBuffer::new(config.display.history_length),
            );
            run_replay(&service, json).await?;
        }
        Commands::Status { json } => {
            let source = create_device_source(&config.source)?;
            run_status(&*source, &ThresholdSet::from(&config.thresholds), json).await?;
        }
        Commands::Config => {
            run_config(&config)?;
        }
    }

    Ok(())
}
