// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::config::ForwarderConfig;
use crate::error::ForwarderError;
use crate::http::get_client;
use crate::payload::{IngestPayload, Level, LogEvent, WebhookPayload};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Instant;
use tracing::debug;

/// Sends log events to BetterStack, one request per event.
///
/// Every call is best effort: failures are logged at debug level and never
/// returned to the caller of [`Forwarder::log`].
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    config: ForwarderConfig,
}

impl Forwarder {
    #[must_use]
    pub fn new(config: ForwarderConfig) -> Self {
        Forwarder {
            client: get_client(),
            config,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ForwarderConfig::from_env())
    }

    #[must_use]
    pub fn config(&self) -> &ForwarderConfig {
        &self.config
    }

    pub async fn log(&self, event: LogEvent) {
        if !self.config.is_enabled() || event.message.is_empty() {
            return;
        }

        let payload = IngestPayload::new(&event, self.config.source.as_deref());
        if let Err(e) = self.ship(&payload).await {
            debug!("BETTERSTACK | Failed to ship log: {e}");
        }

        if payload.level == Level::Error && self.config.webhook_url.is_some() {
            if let Err(e) = self.notify(&WebhookPayload::new(&payload)).await {
                debug!("WEBHOOK | Failed to send notification: {e}");
            }
        }
    }

    /// POSTs a single payload to the ingest endpoint.
    pub async fn ship(&self, payload: &IngestPayload) -> Result<(), ForwarderError> {
        let (Some(token), Some(url)) = (&self.config.token, &self.config.ingest_url) else {
            return Err(ForwarderError::Disabled);
        };
        if payload.message.is_empty() {
            return Err(ForwarderError::EmptyMessage);
        }

        let start = Instant::now();
        let resp = self
            .client
            .post(url)
            .timeout(self.config.ingest_timeout)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        debug!(
            "BETTERSTACK | {} response in {} ms",
            status,
            start.elapsed().as_millis()
        );
        if !status.is_success() {
            return Err(ForwarderError::Status(status));
        }
        Ok(())
    }

    /// POSTs a notification to the configured webhook.
    pub async fn notify(&self, payload: &WebhookPayload) -> Result<(), ForwarderError> {
        let Some(url) = &self.config.webhook_url else {
            return Err(ForwarderError::NoWebhook);
        };

        let resp = self
            .client
            .post(url)
            .timeout(self.config.webhook_timeout)
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ForwarderError::Status(status));
        }
        Ok(())
    }
}
