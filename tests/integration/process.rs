//! The `scim-gateway` binary as a process: readiness, SIGTERM and exit codes.

#![cfg(unix)]

use crate::common::TEST_API_KEY;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};

const LISTENING: &str = "SCIM gateway listening on http://";

/// The gateway on a free local port, logging JSON lines to stdout.
fn gateway() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_scim-gateway"));
    command
        .env("SCIM_API_KEY", TEST_API_KEY)
        .env("SERVER_HOST", "127.0.0.1")
        .env("SERVER_PORT", "0")
        .env("SERVER_SHUTDOWN_TIMEOUT", "5s")
        .env("LOG_LEVEL", "info")
        .env("LOG_OUTPUT_PATHS", "stdout")
        .env("ENVIRONMENT", "production")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    command
}

/// Read the log until the listener reports its address. The rest of the
/// output keeps being drained so the process never blocks on a full pipe.
async fn wait_until_listening(child: &mut Child) -> String {
    let stdout = child.stdout.take().expect("stdout is piped");
    let mut lines = BufReader::new(stdout).lines();

    while let Some(line) = lines.next_line().await.unwrap() {
        let Ok(record) = serde_json::from_str::<serde_json::Value>(&line) else {
            continue;
        };
        let address = record["message"]
            .as_str()
            .and_then(|message| message.strip_prefix(LISTENING))
            .map(str::to_string);
        if let Some(address) = address {
            tokio::spawn(async move { while let Ok(Some(_)) = lines.next_line().await {} });
            return address;
        }
    }
    panic!("gateway exited before it started listening");
}

fn send_sigterm(child: &Child) {
    let pid = child.id().expect("gateway is still running");
    let status = std::process::Command::new("kill")
        .args(["-TERM", &pid.to_string()])
        .status()
        .unwrap();
    assert!(status.success());
}

async fn exit_status(child: &mut Child) -> ExitStatus {
    tokio::time::timeout(Duration::from_secs(15), child.wait())
        .await
        .expect("gateway should exit")
        .unwrap()
}

#[tokio::test]
async fn test_sigterm_stops_the_gateway_with_success() {
    let mut child = gateway().spawn().unwrap();
    let address = tokio::time::timeout(Duration::from_secs(30), wait_until_listening(&mut child))
        .await
        .expect("gateway should start listening");

    let response = reqwest::Client::new()
        .get(format!("http://{}/scim/v2/ServiceProviderConfig", address))
        .header("X-API-KEY", TEST_API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    send_sigterm(&child);
    let status = exit_status(&mut child).await;
    assert!(status.success(), "unexpected exit: {:?}", status);
}

#[tokio::test]
async fn test_occupied_port_exits_with_failure() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    let mut child = gateway()
        .env("SERVER_PORT", port.to_string())
        .spawn()
        .unwrap();
    let status = exit_status(&mut child).await;
    assert!(!status.success());
    assert_eq!(status.code(), Some(1));
}

#[tokio::test]
async fn test_missing_api_key_exits_with_failure() {
    let mut child = gateway().env_remove("SCIM_API_KEY").spawn().unwrap();
    let status = exit_status(&mut child).await;
    assert_eq!(status.code(), Some(1));
}
