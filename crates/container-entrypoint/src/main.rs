// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use anyhow::Context;
use std::env;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use betterstack_log::{config::load_dotenv, Forwarder};
use container_entrypoint::{cli::Args, heartbeat::HeartbeatConfig};

#[tokio::main]
pub async fn main() -> ExitCode {
    let dotenv = load_dotenv();

    let log_level = env::var("LOG_LEVEL")
        .map(|val| val.to_lowercase())
        .unwrap_or("info".to_string());
    if let Err(e) = init_logging(&log_level) {
        eprintln!("Failed to initialize logging: {e:#}");
    }
    debug!("Logging subsystem enabled");
    match dotenv {
        Ok(Some(path)) => debug!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => warn!("Failed to load .env file: {e}"),
    }

    let args = Args::from_env();
    let forwarder = Forwarder::from_env();
    if !forwarder.config().is_enabled() {
        debug!("BETTERSTACK_TOKEN or BETTERSTACK_INGEST_URL not set, logs will not be forwarded");
    }

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        match wait_for_signal().await {
            Ok(()) => trigger.cancel(),
            Err(e) => error!("{e:#}"),
        }
    });

    match container_entrypoint::run(&args, &forwarder, &HeartbeatConfig::default(), &shutdown)
        .await
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::from(1),
    }
}

fn init_logging(log_level: &str) -> anyhow::Result<()> {
    let env_filter = format!("h2=off,hyper=off,rustls=off,reqwest=off,{log_level}");

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(env_filter).context("could not parse LOG_LEVEL")?,
        )
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .without_time()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

#[cfg(unix)]
async fn wait_for_signal() -> anyhow::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate =
        signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res.context("failed to listen for SIGINT")?,
        _ = terminate.recv() => {}
    }
    debug!("Received shutdown signal");
    Ok(())
}

#[cfg(not(unix))]
async fn wait_for_signal() -> anyhow::Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    debug!("Received shutdown signal");
    Ok(())
}
