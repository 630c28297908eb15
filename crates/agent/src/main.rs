// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! upkeepd: device-resident application update agent.
//!
//! Connects to the fleet broker, polls for pending update jobs, downloads
//! artifacts, hands them to the target applications, and reports job-status
//! transitions back to the orchestrator.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use upkeep_agent::{
    fetcher, AgentConfig, Executor, ManifestRegistry, Processor, Runtime, Session, SpoolNotifier,
    StatusReporter,
};
use upkeep_broker::{BrokerEvent, Channel, MqttChannel};
use upkeep_core::ClientToken;
use upkeep_wire::JobTopics;

/// Depth of the runtime's event channel.
const EVENT_QUEUE_DEPTH: usize = 64;

#[derive(Parser)]
#[command(name = "upkeepd", version, about = "Device-resident application update agent")]
struct Cli {
    /// Path to the agent configuration file
    #[arg(short, long, value_name = "PATH", default_value = "/etc/upkeep/upkeepd.toml")]
    config: PathBuf,

    /// Write logs to daily-rotated files in this directory instead of stderr
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

fn init_tracing(log_dir: Option<&PathBuf>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "upkeepd.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_dir.as_ref());

    let config = AgentConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    tracing::info!(device_id = %config.device_id, "starting upkeepd");

    let credential = config.credential_store().load().context("loading broker credential")?;
    let (channel, mut stream) = MqttChannel::open(config.broker_settings(), credential);

    let topics = JobTopics::new(&config.device_id);
    let token = config
        .jobs
        .client_token
        .clone()
        .map(ClientToken::new)
        .unwrap_or_else(ClientToken::generate);

    let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
    let (broker_tx, broker_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);

    // Pump the broker's event stream into the session's inbound channel.
    // A disconnect is terminal: stop pumping so the client never retries.
    tokio::spawn(async move {
        loop {
            let event = stream.next().await;
            let terminal = matches!(event, BrokerEvent::Disconnected { .. });
            if broker_tx.send(event).await.is_err() || terminal {
                break;
            }
        }
    });

    let fetcher = fetcher::spawn(
        config.jobs.fetch_workers,
        config.jobs.fetch_queue_depth,
        config.storage.download_dir.clone(),
        events_tx.clone(),
    );
    let registry = ManifestRegistry::new(config.storage.manifest_path.clone());
    let notifier = SpoolNotifier::new(config.storage.events_dir.clone());
    let reporter = StatusReporter::new(
        channel.clone(),
        topics.clone(),
        token.clone(),
        config.jobs.step_timeout_minutes,
    );
    let processor = Processor::new(topics.clone(), token, registry);
    let executor = Executor::new(channel.clone(), reporter, notifier, fetcher);
    let runtime = Runtime::new(processor, executor);

    let session = Arc::new(Session::new(
        channel.clone(),
        topics,
        events_tx,
        config.poll_interval(),
    ));

    let cancel = CancellationToken::new();
    tokio::select! {
        _ = session.run(broker_rx, cancel.clone()) => {
            tracing::info!("session over, exiting");
        }
        _ = runtime.run(events_rx) => {
            tracing::info!("runtime stopped, exiting");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
            cancel.cancel();
            if let Err(err) = channel.disconnect().await {
                tracing::warn!(error = %err, "disconnect failed");
            }
        }
    }

    Ok(())
}
