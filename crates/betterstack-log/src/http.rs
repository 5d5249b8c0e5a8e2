// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use reqwest::ClientBuilder;
use tracing::error;

/// Creates a reqwest client builder with rustls TLS.
#[must_use]
pub fn create_client_builder() -> ClientBuilder {
    reqwest::Client::builder().use_rustls_tls()
}

/// Builds the HTTP client shared by all requests of a forwarder.
///
/// Falls back to a default client if the builder fails.
#[must_use]
pub fn get_client() -> reqwest::Client {
    match create_client_builder().build() {
        Ok(client) => client,
        Err(e) => {
            error!("Unable to create HTTP client, falling back to default: {e}");
            reqwest::Client::default()
        }
    }
}
