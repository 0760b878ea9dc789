//! Listener lifecycle over a real socket.

use crate::common::{TEST_API_KEY, handler};
use axum::{Router, routing::get};
use scim_gateway::config::ServerConfig;
use scim_gateway::{GatewayServer, ServerError};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Notify;

fn server_config(shutdown_timeout: Duration) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        shutdown_timeout,
        ..ServerConfig::default()
    }
}

/// Discovery router plus a `/slow` route that signals `started` and then
/// takes `delay` to answer.
fn router_with_slow_route(started: Arc<Notify>, delay: Duration) -> Router {
    handler().router().route(
        "/slow",
        get(move || {
            let started = Arc::clone(&started);
            async move {
                started.notify_one();
                tokio::time::sleep(delay).await;
                "done"
            }
        }),
    )
}

#[tokio::test]
async fn test_serves_discovery_over_tcp() {
    let mut server = GatewayServer::new(server_config(Duration::from_secs(5)), handler().router());
    server.listen_and_serve();
    let addr = server.local_addr().await.expect("listener should bind");

    let response = reqwest::Client::new()
        .get(format!("http://{}/scim/v2/ServiceProviderConfig", addr))
        .header("X-API-KEY", format!("Bearer {}", TEST_API_KEY))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok()),
        Some("application/scim+json")
    );

    let body: serde_json::Value = serde_json::from_str(&response.text().await.unwrap()).unwrap();
    assert_eq!(body["patch"]["supported"], true);

    assert!(server.shutdown(async {}).await.is_ok());
}

#[tokio::test]
async fn test_shutdown_drains_in_flight_request() {
    let started = Arc::new(Notify::new());
    let router = router_with_slow_route(Arc::clone(&started), Duration::from_millis(300));

    let mut server = GatewayServer::new(server_config(Duration::from_secs(5)), router);
    server.listen_and_serve();
    let addr = server.local_addr().await.expect("listener should bind");

    let in_flight = tokio::spawn(async move {
        let response = reqwest::get(format!("http://{}/slow", addr)).await?;
        response.text().await
    });
    started.notified().await;

    assert!(server.shutdown(async {}).await.is_ok());
    assert_eq!(in_flight.await.unwrap().unwrap(), "done");

    // The listener is gone once shutdown has returned.
    assert!(
        reqwest::get(format!("http://{}/scim/v2/Schemas", addr))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_shutdown_times_out_when_requests_do_not_drain() {
    let started = Arc::new(Notify::new());
    let router = router_with_slow_route(Arc::clone(&started), Duration::from_secs(10));

    let grace_period = Duration::from_millis(200);
    let mut server = GatewayServer::new(server_config(grace_period), router);
    server.listen_and_serve();
    let addr = server.local_addr().await.expect("listener should bind");

    let in_flight = tokio::spawn(reqwest::get(format!("http://{}/slow", addr)));
    started.notified().await;

    let err = server.shutdown(async {}).await.unwrap_err();
    assert!(matches!(err, ServerError::ShutdownTimeout { grace_period: g } if g == grace_period));
    assert_eq!(err.kind().as_str(), "shutdownTimeout");

    // The connection is closed under the request instead of running on.
    let cut_off = tokio::time::timeout(Duration::from_secs(3), in_flight)
        .await
        .expect("the stuck connection should be closed")
        .unwrap();
    assert!(cut_off.is_err());
}

#[tokio::test]
async fn test_idle_keep_alive_connection_is_closed() {
    let config = ServerConfig {
        idle_timeout: Duration::from_millis(200),
        read_timeout: Duration::from_secs(10),
        ..server_config(Duration::from_secs(5))
    };
    let mut server = GatewayServer::new(config, handler().router());
    server.listen_and_serve();
    let addr = server.local_addr().await.expect("listener should bind");

    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET /scim/v2/ServiceProviderConfig HTTP/1.1\r\nHost: {}\r\nX-API-KEY: {}\r\n\r\n",
        addr, TEST_API_KEY
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    // The response leaves the connection open; reading to the end only
    // finishes once the server closes it for idling.
    let mut received = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut received))
        .await
        .expect("idle connection should be closed")
        .unwrap();
    assert!(String::from_utf8_lossy(&received).starts_with("HTTP/1.1 200"));

    assert!(server.shutdown(async {}).await.is_ok());
}

#[tokio::test]
async fn test_silent_client_is_dropped_after_the_read_timeout() {
    let config = ServerConfig {
        read_timeout: Duration::from_millis(200),
        idle_timeout: Duration::from_secs(60),
        ..server_config(Duration::from_secs(5))
    };
    let mut server = GatewayServer::new(config, handler().router());
    server.listen_and_serve();
    let addr = server.local_addr().await.expect("listener should bind");

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"GET /scim/v2/Schemas HTTP/1.1\r\n").await.unwrap();

    let mut received = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut received))
        .await
        .expect("a client stuck in its headers should be dropped")
        .ok();
    assert!(!String::from_utf8_lossy(&received).starts_with("HTTP/1.1 200"));

    assert!(server.shutdown(async {}).await.is_ok());
}

#[tokio::test]
async fn test_listen_failure_wins_over_a_pending_signal() {
    let occupied = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let config = ServerConfig {
        port: occupied.local_addr().unwrap().port(),
        ..server_config(Duration::from_secs(1))
    };

    let mut server = GatewayServer::new(config, handler().router());
    server.listen_and_serve();

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        server.shutdown(std::future::pending::<()>()),
    )
    .await
    .expect("listen failure should end the wait");
    assert!(matches!(result, Err(ServerError::ListenFailure { .. })));
}
