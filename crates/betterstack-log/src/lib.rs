// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Best-effort log forwarding to BetterStack.
//!
//! Each [`LogEvent`] becomes one HTTP POST to the configured ingest URL.
//! ERROR events additionally notify a Discord webhook when one is configured.
//! Nothing is retried or batched, and [`Forwarder::log`] never fails.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod config;
pub mod error;
pub mod forwarder;
pub mod http;
pub mod payload;

pub use config::ForwarderConfig;
pub use error::ForwarderError;
pub use forwarder::Forwarder;
pub use payload::{Level, LogEvent};
