// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Wire shapes for the ingest endpoint and the Discord webhook.

use crate::config::WEBHOOK_USERNAME;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

pub const WEBHOOK_CONTENT_LIMIT: usize = 1900;
pub const WEBHOOK_CONTEXT_LIMIT: usize = 400;
const DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    /// Any other level name, stored upper-cased
    Other(String),
}

impl From<&str> for Level {
    fn from(level: &str) -> Self {
        match level.to_uppercase().as_str() {
            "TRACE" => Level::Trace,
            "DEBUG" => Level::Debug,
            "INFO" => Level::Info,
            "WARN" => Level::Warn,
            "ERROR" => Level::Error,
            other => Level::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Trace => f.write_str("TRACE"),
            Level::Debug => f.write_str("DEBUG"),
            Level::Info => f.write_str("INFO"),
            Level::Warn => f.write_str("WARN"),
            Level::Error => f.write_str("ERROR"),
            Level::Other(level) => f.write_str(level),
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single log message with optional structured context.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub message: String,
    pub level: Level,
    pub extra: Map<String, Value>,
}

impl LogEvent {
    pub fn new(message: impl Into<String>, level: impl Into<Level>) -> Self {
        Self {
            message: message.into(),
            level: level.into(),
            extra: Map::new(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Level::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Level::Error)
    }

    /// Attaches a context value. Values that cannot be represented as JSON are dropped.
    #[must_use]
    pub fn with_extra<T: Serialize + ?Sized>(mut self, key: impl Into<String>, value: &T) -> Self {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(value) => {
                self.extra.insert(key, value);
            }
            Err(e) => debug!("Dropping non-serializable extra '{key}': {e}"),
        }
        self
    }
}

/// Body posted to the ingest endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct IngestPayload {
    pub dt: String,
    pub level: Level,
    pub message: String,
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<Map<String, Value>>,
}

impl IngestPayload {
    #[must_use]
    pub fn new(event: &LogEvent, source: Option<&str>) -> Self {
        Self::at(event, source, Utc::now())
    }

    #[must_use]
    pub fn at(event: &LogEvent, source: Option<&str>, now: DateTime<Utc>) -> Self {
        Self {
            dt: now.format(DT_FORMAT).to_string(),
            level: event.level.clone(),
            message: event.message.clone(),
            source: source.map(str::to_string),
            extra: (!event.extra.is_empty()).then(|| event.extra.clone()),
        }
    }
}

/// Body posted to the Discord webhook for ERROR events.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub content: String,
    pub username: String,
}

impl WebhookPayload {
    #[must_use]
    pub fn new(payload: &IngestPayload) -> Self {
        let mut content = truncate(
            &format!("[{}] {}", Level::Error, payload.message),
            WEBHOOK_CONTENT_LIMIT,
        );
        if let Some(extra) = &payload.extra {
            let ctx = Value::Object(extra.clone()).to_string();
            content.push_str("\nctx: ");
            content.push_str(&truncate(&ctx, WEBHOOK_CONTEXT_LIMIT));
        }
        Self {
            content,
            username: WEBHOOK_USERNAME.to_string(),
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_level_parsing_is_case_insensitive() {
        assert_eq!(Level::from("info"), Level::Info);
        assert_eq!(Level::from("Error"), Level::Error);
        assert_eq!(Level::from("notice"), Level::Other("NOTICE".to_string()));
        assert_eq!(Level::from("notice").to_string(), "NOTICE");
    }

    #[test]
    fn test_ingest_payload_shape() {
        let event = LogEvent::info("received input path").with_extra("input_path", "/data/in.pdf");
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let payload = IngestPayload::at(&event, Some("backend"), now);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "dt": "2024-03-09 07:05:01 UTC",
                "level": "INFO",
                "message": "received input path",
                "source": "backend",
                "extra": {"input_path": "/data/in.pdf"},
            })
        );
    }

    #[test]
    fn test_ingest_payload_without_extra_or_source() {
        let event = LogEvent::new("heartbeat 1/3 from container", "info");
        let payload = IngestPayload::new(&event, None);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["source"], Value::Null);
        assert_eq!(value["level"], "INFO");
        assert!(value.get("extra").is_none());
    }

    #[test]
    fn test_non_serializable_extra_is_dropped() {
        use std::collections::HashMap;
        // JSON object keys must be strings
        let mut bad = HashMap::new();
        bad.insert((1, 2), "tuple key");
        let event = LogEvent::error("boom")
            .with_extra("bad", &bad)
            .with_extra("attempt", &3);
        assert_eq!(event.extra.len(), 1);
        assert_eq!(event.extra["attempt"], json!(3));
    }

    #[test]
    fn test_webhook_content_is_truncated() {
        let event = LogEvent::error("x".repeat(5000));
        let webhook = WebhookPayload::new(&IngestPayload::new(&event, None));
        assert_eq!(webhook.content.chars().count(), WEBHOOK_CONTENT_LIMIT);
        assert!(webhook.content.starts_with("[ERROR] xxx"));
        assert_eq!(webhook.username, "velocity-read-backend");
    }

    #[test]
    fn test_webhook_appends_truncated_context() {
        let event = LogEvent::error("Error: interrupted").with_extra("blob", &"y".repeat(1000));
        let webhook = WebhookPayload::new(&IngestPayload::new(&event, None));
        let (head, ctx) = webhook
            .content
            .split_once("\nctx: ")
            .expect("context should be appended");
        assert_eq!(head, "[ERROR] Error: interrupted");
        assert_eq!(ctx.chars().count(), WEBHOOK_CONTEXT_LIMIT);
        assert!(ctx.starts_with("{\"blob\":\"yyy"));
    }
}
