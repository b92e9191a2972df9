mod common;

use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use url_alias::domain::repositories::UrlRepository;
use url_alias::routes::App;
use url_alias::server::{ShutdownError, serve};
use url_alias::shutdown::ShutdownSignal;

const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

fn slow_app(delay: Duration) -> App {
    let router = Router::new()
        .route("/fast", get(|| async { "fast" }))
        .route(
            "/slow",
            get(move || async move {
                tokio::time::sleep(delay).await;
                "slow"
            }),
        );

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

fn bind() -> (std::net::TcpListener, SocketAddr) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Sends a single HTTP/1.1 request and reads until the server closes.
async fn fetch(addr: SocketAddr, path: &str) -> std::io::Result<String> {
    let mut stream = TcpStream::connect(addr).await?;
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await?;

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[tokio::test]
async fn test_serves_until_triggered() {
    let repo = common::create_test_repository().await;
    let (listener, addr) = bind();
    let signal = ShutdownSignal::new();
    let trigger = signal.trigger_handle();

    let server = tokio::spawn(serve(
        listener,
        slow_app(Duration::from_millis(10)),
        repo.clone() as Arc<dyn UrlRepository>,
        signal,
        IDLE_TIMEOUT,
        Duration::from_secs(5),
    ));

    let response = fetch(addr, "/fast").await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.ends_with("fast"));
    assert!(!server.is_finished());

    trigger.trigger();
    let report = server.await.unwrap().unwrap();

    assert!(report.is_clean());
    assert!(repo.pool().is_closed());
}

#[tokio::test]
async fn test_in_flight_request_completes_during_drain() {
    let repo = common::create_test_repository().await;
    let (listener, addr) = bind();
    let signal = ShutdownSignal::new();
    let trigger = signal.trigger_handle();

    let server = tokio::spawn(serve(
        listener,
        slow_app(Duration::from_millis(300)),
        repo.clone() as Arc<dyn UrlRepository>,
        signal,
        IDLE_TIMEOUT,
        Duration::from_secs(5),
    ));

    let client = tokio::spawn(fetch(addr, "/slow"));
    tokio::time::sleep(Duration::from_millis(100)).await;
    trigger.trigger();

    let response = client.await.unwrap().unwrap();
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.ends_with("slow"));

    let report = server.await.unwrap().unwrap();
    assert!(report.drain.is_ok());
    assert!(report.storage.is_ok());
}

#[tokio::test]
async fn test_new_connections_refused_after_shutdown() {
    let repo = common::create_test_repository().await;
    let (listener, addr) = bind();
    let signal = ShutdownSignal::new();
    let trigger = signal.trigger_handle();

    let server = tokio::spawn(serve(
        listener,
        slow_app(Duration::from_millis(10)),
        repo as Arc<dyn UrlRepository>,
        signal,
        IDLE_TIMEOUT,
        Duration::from_secs(5),
    ));

    fetch(addr, "/fast").await.unwrap();

    trigger.trigger();
    server.await.unwrap().unwrap();

    assert!(TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn test_drain_timeout_aborts_slow_requests() {
    let repo = common::create_test_repository().await;
    let (listener, addr) = bind();
    let signal = ShutdownSignal::new();
    let trigger = signal.trigger_handle();

    let server = tokio::spawn(serve(
        listener,
        slow_app(Duration::from_secs(30)),
        repo.clone() as Arc<dyn UrlRepository>,
        signal,
        IDLE_TIMEOUT,
        Duration::from_millis(200),
    ));

    let client = tokio::spawn(fetch(addr, "/slow"));
    tokio::time::sleep(Duration::from_millis(100)).await;
    trigger.trigger();

    let report = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("serve must return once the drain timeout elapses")
        .unwrap()
        .unwrap();

    assert!(matches!(report.drain, Err(ShutdownError::Timeout(_))));
    assert!(report.storage.is_ok());
    assert!(repo.pool().is_closed());

    let outcome = tokio::time::timeout(Duration::from_secs(5), client)
        .await
        .unwrap()
        .unwrap();
    match outcome {
        Ok(body) => assert!(!body.contains("200")),
        Err(_) => {}
    }
}

#[tokio::test]
async fn test_storage_close_failure_is_reported() {
    let repo = common::create_test_repository().await;
    repo.close().await.unwrap();

    let (listener, _addr) = bind();
    let signal = ShutdownSignal::new();
    signal.trigger_handle().trigger();

    let report = serve(
        listener,
        slow_app(Duration::from_millis(10)),
        repo as Arc<dyn UrlRepository>,
        signal,
        IDLE_TIMEOUT,
        Duration::from_secs(1),
    )
    .await
    .unwrap();

    assert!(report.drain.is_ok());
    assert!(report.storage.is_err());
    assert!(!report.is_clean());
}

#[tokio::test]
async fn test_idle_connection_is_closed() {
    let repo = common::create_test_repository().await;
    let (listener, addr) = bind();
    let signal = ShutdownSignal::new();
    let trigger = signal.trigger_handle();

    let server = tokio::spawn(serve(
        listener,
        slow_app(Duration::from_millis(10)),
        repo as Arc<dyn UrlRepository>,
        signal,
        Duration::from_millis(200),
        Duration::from_secs(5),
    ));

    let mut idle = TcpStream::connect(addr).await.unwrap();
    let mut buf = Vec::new();
    let closed = tokio::time::timeout(Duration::from_secs(5), idle.read_to_end(&mut buf)).await;
    assert!(closed.is_ok(), "idle connection was kept open");
    assert!(buf.is_empty());

    let response = fetch(addr, "/fast").await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(!server.is_finished());

    trigger.trigger();
    let report = server.await.unwrap().unwrap();
    assert!(report.is_clean());
}
