// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use betterstack_log::{Forwarder, LogEvent};
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const DEFAULT_BEATS: u32 = 3;
const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    pub beats: u32,
    /// Pause after each beat, including the last one
    pub interval: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            beats: DEFAULT_BEATS,
            interval: DEFAULT_INTERVAL,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HeartbeatError {
    #[error("heartbeat interrupted after {completed}/{total} beats")]
    Interrupted { completed: u32, total: u32 },
}

/// Sends `beats` INFO heartbeats, sleeping `interval` after each one.
///
/// Returns early with [`HeartbeatError::Interrupted`] once `shutdown` is cancelled.
pub async fn run(
    forwarder: &Forwarder,
    config: &HeartbeatConfig,
    shutdown: &CancellationToken,
) -> Result<(), HeartbeatError> {
    let total = config.beats;
    for beat in 1..=total {
        if shutdown.is_cancelled() {
            return Err(HeartbeatError::Interrupted {
                completed: beat - 1,
                total,
            });
        }

        debug!("Sending heartbeat {beat}/{total}");
        forwarder
            .log(LogEvent::info(format!("heartbeat {beat}/{total} from container")))
            .await;

        tokio::select! {
            () = sleep(config.interval) => {}
            () = shutdown.cancelled() => {
                return Err(HeartbeatError::Interrupted {
                    completed: beat,
                    total,
                });
            }
        }
    }
    Ok(())
}
