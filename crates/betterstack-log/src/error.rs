// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use reqwest::StatusCode;

/// Errors that can occur when shipping a single log request
#[derive(Debug, thiserror::Error)]
pub enum ForwarderError {
    #[error("Forwarder is disabled: BETTERSTACK_TOKEN or BETTERSTACK_INGEST_URL not set")]
    Disabled,

    #[error("No webhook configured")]
    NoWebhook,

    #[error("Refusing to send an empty message")]
    EmptyMessage,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status code: {0}")]
    Status(StatusCode),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ForwarderError::Status(StatusCode::UNAUTHORIZED);
        assert_eq!(error.to_string(), "Unexpected status code: 401 Unauthorized");
    }

    #[test]
    fn test_error_debug() {
        let error = ForwarderError::EmptyMessage;
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("EmptyMessage"));
    }
}
