// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use betterstack_log::{Forwarder, ForwarderConfig};
use container_entrypoint::{cli::Args, heartbeat::HeartbeatConfig, run};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use serial_test::serial;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn forwarder_for(server: &ServerGuard) -> Forwarder {
    Forwarder::new(ForwarderConfig::new(
        Some("mock-token".to_string()),
        Some(format!("{}/ingest", server.url())),
        Some("backend".to_string()),
        Some(format!("{}/hook", server.url())),
    ))
}

fn fast_heartbeat() -> HeartbeatConfig {
    HeartbeatConfig {
        beats: 3,
        interval: Duration::from_millis(1),
    }
}

#[tokio::test]
#[serial]
async fn reports_input_path_and_heartbeats() {
    std::env::remove_var("INPUT_PATH");
    let mut server = Server::new_async().await;

    let input = server
        .mock("POST", "/ingest")
        .match_header("Authorization", "Bearer mock-token")
        .match_body(Matcher::PartialJson(json!({
            "level": "INFO",
            "message": "received input path",
            "extra": {"input_path": "/data/page_6.pdf"},
        })))
        .with_status(202)
        .expect(1)
        .create_async()
        .await;
    let heartbeats: Vec<_> = heartbeat_mocks(&mut server, 3).await;
    let hook = server
        .mock("POST", "/hook")
        .expect(0)
        .create_async()
        .await;

    let args = Args::parse_lenient([
        "entrypoint",
        "--model_path",
        "./hf_model",
        "--input-path",
        "/data/page_6.pdf",
    ]);
    let result = run(
        &args,
        &forwarder_for(&server),
        &fast_heartbeat(),
        &CancellationToken::new(),
    )
    .await;

    assert!(result.is_ok());
    input.assert_async().await;
    for mock in heartbeats {
        mock.assert_async().await;
    }
    hook.assert_async().await;
}

#[tokio::test]
#[serial]
async fn missing_input_path_still_heartbeats() {
    std::env::remove_var("INPUT_PATH");
    let mut server = Server::new_async().await;

    let input = server
        .mock("POST", "/ingest")
        .match_body(Matcher::PartialJson(json!({"message": "received input path"})))
        .expect(0)
        .create_async()
        .await;
    let heartbeats: Vec<_> = heartbeat_mocks(&mut server, 3).await;

    let args = Args::parse_lenient(["entrypoint"]);
    let result = run(
        &args,
        &forwarder_for(&server),
        &fast_heartbeat(),
        &CancellationToken::new(),
    )
    .await;

    assert!(result.is_ok());
    input.assert_async().await;
    for mock in heartbeats {
        mock.assert_async().await;
    }
}

#[tokio::test]
#[serial]
async fn interrupted_heartbeat_reports_error() {
    std::env::remove_var("INPUT_PATH");
    let mut server = Server::new_async().await;

    let error = server
        .mock("POST", "/ingest")
        .match_body(Matcher::PartialJson(json!({
            "level": "ERROR",
            "message": "Error: heartbeat interrupted after 0/3 beats",
        })))
        .with_status(202)
        .expect(1)
        .create_async()
        .await;
    let hook = server
        .mock("POST", "/hook")
        .match_body(Matcher::Json(json!({
            "content": "[ERROR] Error: heartbeat interrupted after 0/3 beats",
            "username": "velocity-read-backend",
        })))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let shutdown = CancellationToken::new();
    shutdown.cancel();

    let args = Args::parse_lenient(["entrypoint"]);
    let result = run(&args, &forwarder_for(&server), &fast_heartbeat(), &shutdown).await;

    assert!(result.is_err());
    error.assert_async().await;
    hook.assert_async().await;
}

async fn heartbeat_mocks(server: &mut ServerGuard, beats: u32) -> Vec<mockito::Mock> {
    let mut mocks = Vec::new();
    for beat in 1..=beats {
        let mock = server
            .mock("POST", "/ingest")
            .match_body(Matcher::PartialJson(json!({
                "level": "INFO",
                "message": format!("heartbeat {beat}/{beats} from container"),
                "source": "backend",
            })))
            .with_status(202)
            .expect(1)
            .create_async()
            .await;
        mocks.push(mock);
    }
    mocks
}
