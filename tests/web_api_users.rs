//! Web API User Tests
//!
//! Integration tests for registration, sessions and status endpoints.

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderName, StatusCode};
use axum_test::TestServer;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use files_manager::auth::{SessionManager, TokenStore};
use files_manager::db::{NewUser, UserRepository};
use files_manager::file::BlobStorage;
use files_manager::web::router::{create_health_router, create_router};
use files_manager::web::AppState;
use files_manager::Database;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

const X_TOKEN: HeaderName = HeaderName::from_static("x-token");

/// Create a test server with an in-memory database.
async fn create_test_server() -> (TestServer, Arc<Database>, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let shared_db = Arc::new(db);

    let app_state = Arc::new(AppState::new(
        shared_db.clone(),
        BlobStorage::new(dir.path()),
        SessionManager::with_default_ttl(Arc::new(TokenStore::new())),
    ));

    let router = create_router(app_state).merge(create_health_router());
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, shared_db, dir)
}

fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

/// Register a user and return the response body.
async fn register_test_user(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/users")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

/// Sign in and return the session token.
async fn connect(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .get("/connect")
        .add_header(AUTHORIZATION, basic_auth(email, password))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register() {
    let (server, db, _dir) = create_test_server().await;

    let body = register_test_user(&server, "bob@dylan.com", "toto1234!").await;
    assert_eq!(body["email"], "bob@dylan.com");
    let id = body["id"].as_i64().unwrap();
    assert_eq!(body, json!({ "id": id, "email": "bob@dylan.com" }));

    let user = UserRepository::new(db.pool())
        .get_by_id(id)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(user.password, "toto1234!");
    assert!(user.password.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_register_validation() {
    let (server, _db, _dir) = create_test_server().await;

    let cases = [
        (json!({ "password": "pw" }), "Missing email"),
        (json!({ "email": "", "password": "pw" }), "Missing email"),
        (json!({ "email": "a@b.c" }), "Missing password"),
    ];

    for (body, message) in cases {
        let response = server.post("/users").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>(), json!({ "error": message }));
    }
}

#[tokio::test]
async fn test_register_duplicate() {
    let (server, db, _dir) = create_test_server().await;

    UserRepository::new(db.pool())
        .create(&NewUser::new("bob@dylan.com", "hash"))
        .await
        .unwrap();

    let response = server
        .post("/users")
        .json(&json!({ "email": "bob@dylan.com", "password": "other" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "error": "Already exist" }));
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_connect_me_disconnect() {
    let (server, _db, _dir) = create_test_server().await;

    let user = register_test_user(&server, "bob@dylan.com", "toto1234!").await;
    let token = connect(&server, "bob@dylan.com", "toto1234!").await;
    assert!(!token.is_empty());

    let response = server
        .get("/users/me")
        .add_header(X_TOKEN, token.clone())
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), user);

    // The token opens the file routes
    server
        .get("/files")
        .add_header(X_TOKEN, token.clone())
        .await
        .assert_status_ok();

    let response = server
        .get("/disconnect")
        .add_header(X_TOKEN, token.clone())
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server
        .get("/users/me")
        .add_header(X_TOKEN, token.clone())
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .get("/disconnect")
        .add_header(X_TOKEN, token.clone())
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_connect_rejects_bad_credentials() {
    let (server, _db, _dir) = create_test_server().await;
    register_test_user(&server, "bob@dylan.com", "toto1234!").await;

    let response = server
        .get("/connect")
        .add_header(AUTHORIZATION, basic_auth("bob@dylan.com", "wrong"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), json!({ "error": "Unauthorized" }));

    let response = server
        .get("/connect")
        .add_header(AUTHORIZATION, basic_auth("nobody@example.com", "toto1234!"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server.get("/connect").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .get("/connect")
        .add_header(AUTHORIZATION, "Bearer abc".to_string())
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_each_connect_issues_new_token() {
    let (server, _db, _dir) = create_test_server().await;
    register_test_user(&server, "bob@dylan.com", "toto1234!").await;

    let first = connect(&server, "bob@dylan.com", "toto1234!").await;
    let second = connect(&server, "bob@dylan.com", "toto1234!").await;
    assert_ne!(first, second);

    // Closing one session leaves the other open
    server
        .get("/disconnect")
        .add_header(X_TOKEN, first)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get("/users/me")
        .add_header(X_TOKEN, second)
        .await
        .assert_status_ok();
}

// ============================================================================
// Status
// ============================================================================

#[tokio::test]
async fn test_status() {
    let (server, _db, _dir) = create_test_server().await;

    let response = server.get("/status").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "redis": true, "db": true }));
}

#[tokio::test]
async fn test_stats() {
    let (server, db, _dir) = create_test_server().await;

    let response = server.get("/stats").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "users": 0, "files": 0 }));

    let user = UserRepository::new(db.pool())
        .create(&NewUser::new("bob@dylan.com", "hash"))
        .await
        .unwrap();

    files_manager::FileRepository::new(db.pool())
        .create(&files_manager::file::NewFileRecord::folder(user.id, "docs"))
        .await
        .unwrap();

    let response = server.get("/stats").await;
    assert_eq!(response.json::<Value>(), json!({ "users": 1, "files": 1 }));
}

#[tokio::test]
async fn test_health() {
    let (server, _db, _dir) = create_test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}
