#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;
use url_alias::application::services::{AliasGenerator, AuthService, RandomAliasGenerator};
use url_alias::domain::repositories::UrlRepository;
use url_alias::infrastructure::persistence::SqliteUrlRepository;
use url_alias::routes::app_router;
use url_alias::state::AppState;

pub const USER: &str = "admin";
pub const PASSWORD: &str = "secret";

/// `Authorization` value for [`USER`]:[`PASSWORD`].
pub const BASIC_AUTH: &str = "Basic YWRtaW46c2VjcmV0";

/// `Authorization` value for [`USER`] with a wrong password.
pub const BAD_BASIC_AUTH: &str = "Basic YWRtaW46d3Jvbmc=";

pub async fn create_test_repository() -> Arc<SqliteUrlRepository> {
    Arc::new(SqliteUrlRepository::in_memory().await.unwrap())
}

pub async fn create_test_mapping(repo: &SqliteUrlRepository, alias: &str, url: &str) {
    sqlx::query("INSERT INTO url (alias, url) VALUES (?, ?)")
        .bind(alias)
        .bind(url)
        .execute(repo.pool())
        .await
        .unwrap();
}

pub async fn count_mappings(repo: &SqliteUrlRepository) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url")
        .fetch_one(repo.pool())
        .await
        .unwrap()
}

pub fn create_test_state_with(
    repo: Arc<SqliteUrlRepository>,
    generator: Arc<dyn AliasGenerator>,
    max_attempts: usize,
) -> AppState {
    AppState::new(
        repo as Arc<dyn UrlRepository>,
        generator,
        max_attempts,
        AuthService::new(USER, PASSWORD).unwrap(),
    )
}

pub fn create_test_state(repo: Arc<SqliteUrlRepository>) -> AppState {
    create_test_state_with(repo, Arc::new(RandomAliasGenerator::new(6)), 5)
}

/// Full application router, as served in production.
pub fn create_test_server(state: AppState) -> TestServer {
    let app = app_router(state, Duration::from_secs(5));
    TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap()
}
