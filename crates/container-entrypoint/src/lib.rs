// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod cli;
pub mod heartbeat;

use betterstack_log::{Forwarder, LogEvent};
use cli::Args;
use heartbeat::{HeartbeatConfig, HeartbeatError};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Runs the container job: report the input path, then heartbeat.
///
/// A failed heartbeat is reported to BetterStack at ERROR level before the
/// error is returned, so the caller only has to pick the exit code.
pub async fn run(
    args: &Args,
    forwarder: &Forwarder,
    heartbeat: &HeartbeatConfig,
    shutdown: &CancellationToken,
) -> Result<(), HeartbeatError> {
    match args.input_path() {
        Some(input_path) => {
            println!("INPUT_PATH: {input_path}");
            forwarder
                .log(LogEvent::info("received input path").with_extra("input_path", &input_path))
                .await;
        }
        None => println!("No INPUT_PATH provided (set --input-path or env var INPUT_PATH)"),
    }

    if !args.ignored().is_empty() {
        info!("Ignoring {} unrecognized argument(s)", args.ignored().len());
    }

    match heartbeat::run(forwarder, heartbeat, shutdown).await {
        Ok(()) => {
            println!("Done ✅");
            Ok(())
        }
        Err(e) => {
            error!("{e}");
            forwarder.log(LogEvent::error(format!("Error: {e}"))).await;
            Err(e)
        }
    }
}
