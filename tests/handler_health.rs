mod common;

use axum::http::StatusCode;
use url_alias::domain::repositories::UrlRepository;

#[tokio::test]
async fn test_health_endpoint_success() {
    let repo = common::create_test_repository().await;
    let server = common::create_test_server(common::create_test_state(repo));

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let repo = common::create_test_repository().await;
    let server = common::create_test_server(common::create_test_state(repo.clone()));
    repo.close().await.unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["storage"]["status"], "error");
}
