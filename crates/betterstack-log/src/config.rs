// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

pub const INGEST_TIMEOUT: Duration = Duration::from_secs(2);
pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(3);
pub const DISCORD_WEBHOOK_PREFIX: &str = "https://discord.com/api/webhooks/";
pub const WEBHOOK_USERNAME: &str = "velocity-read-backend";

/// Loads a `.env` file from the working directory or one of its parents.
///
/// Variables already present in the process environment are not overridden.
/// Returns the path of the loaded file, or `None` if there is no `.env` file.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Configuration for the BetterStack forwarder
#[derive(Debug, Clone, Default)]
pub struct ForwarderConfig {
    /// Bearer token for the ingest endpoint
    pub token: Option<String>,
    /// Ingest URL, without trailing slashes
    pub ingest_url: Option<String>,
    /// Source name attached to every payload
    pub source: Option<String>,
    /// Discord webhook notified on ERROR events
    pub webhook_url: Option<String>,
    pub ingest_timeout: Duration,
    pub webhook_timeout: Duration,
}

impl ForwarderConfig {
    /// Create configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            non_empty_var("BETTERSTACK_TOKEN"),
            non_empty_var("BETTERSTACK_INGEST_URL"),
            non_empty_var("BETTERSTACK_SOURCE"),
            non_empty_var("DISCORD_WEBHOOK_URL").and_then(|url| {
                if url.starts_with(DISCORD_WEBHOOK_PREFIX) {
                    Some(url)
                } else {
                    debug!("Ignoring DISCORD_WEBHOOK_URL: not a Discord webhook URL");
                    None
                }
            }),
        )
    }

    /// Builds a configuration from explicit values.
    ///
    /// The webhook URL is taken as-is; only `from_env` restricts it to Discord.
    #[must_use]
    pub fn new(
        token: Option<String>,
        ingest_url: Option<String>,
        source: Option<String>,
        webhook_url: Option<String>,
    ) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            ingest_url: ingest_url
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            source,
            webhook_url: webhook_url.filter(|url| !url.is_empty()),
            ingest_timeout: INGEST_TIMEOUT,
            webhook_timeout: WEBHOOK_TIMEOUT,
        }
    }

    /// Whether both the token and the ingest URL are configured
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.token.is_some() && self.ingest_url.is_some()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.is_empty())
}
