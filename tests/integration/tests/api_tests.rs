//! API Integration Tests
//!
//! Run against the in-memory store by default. The PostgreSQL test
//! additionally needs DATABASE_URL and is skipped without it.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, fixtures::*, postgres_config, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn submit(server: &TestServer, request: &SubmitMessage) -> MessageBody {
    let response = server.post("/api/messages", request).await.unwrap();
    let envelope: Envelope<MessageBody> = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(envelope.success);
    envelope.data.unwrap()
}

async fn list(server: &TestServer, path: &str) -> Vec<MessageBody> {
    let response = server.get_admin(path).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["store"], "healthy");
}

// ============================================================================
// Submission Tests
// ============================================================================

#[tokio::test]
async fn test_submit_message() {
    let server = TestServer::start().await.expect("Failed to start server");

    let message = submit(&server, &SubmitMessage::new("Alice", "Hello")).await;

    assert_eq!(message.name, "Alice");
    assert_eq!(message.message, "Hello");
    assert!(!message.deleted);
    assert!(message.deleted_at.is_none());
    assert!(message.deleted_by.is_none());
    assert!(!message.id.is_empty());
}

#[tokio::test]
async fn test_submit_assigns_unique_ids() {
    let server = TestServer::start().await.expect("Failed to start server");

    let first = submit(&server, &SubmitMessage::unique()).await;
    let second = submit(&server, &SubmitMessage::unique()).await;

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_submit_missing_message() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/messages", &json!({ "name": "Alice" }))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body.error.code, "VALIDATION_ERROR");
    assert!(body.error.details.is_some());
}

#[tokio::test]
async fn test_submit_unknown_field_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post(
            "/api/messages",
            &json!({ "name": "Alice", "message": "Hello", "deleted": true }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert!(list(&server, "/api/messages?deleted=true").await.is_empty());
}

#[tokio::test]
async fn test_required_phone_schema() {
    let server = TestServer::start_with(&[("SUBMISSION_REQUIRED_FIELDS", "phone")])
        .await
        .expect("Failed to start server");

    let response = server
        .post("/api/messages", &SubmitMessage::new("Alice", "Hello"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.details.unwrap()["field"], "phone");

    let message = submit(&server, &SubmitMessage::new("Alice", "Hello").with_phone("555-0100")).await;
    assert_eq!(message.phone.as_deref(), Some("555-0100"));
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_soft_delete_moves_to_trash() {
    let server = TestServer::start().await.expect("Failed to start server");
    let message = submit(&server, &SubmitMessage::new("Alice", "Hello")).await;

    let response = server
        .delete_admin(&format!("/api/messages/{}", message.id))
        .await
        .unwrap();
    let envelope: Envelope<MessageBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope.message.as_deref(), Some("Message moved to Trash"));

    let trashed = envelope.data.unwrap();
    assert!(trashed.deleted);
    assert!(trashed.deleted_at.is_some());
    assert_eq!(trashed.deleted_by.as_deref(), Some("admin"));

    assert!(list(&server, "/api/messages").await.is_empty());

    let trash = list(&server, "/api/messages?deleted=true").await;
    assert_eq!(trash.len(), 1);
    assert_eq!(trash[0].id, message.id);
}

#[tokio::test]
async fn test_soft_delete_with_admin_body() {
    let server = TestServer::start().await.expect("Failed to start server");
    let message = submit(&server, &SubmitMessage::unique()).await;

    let response = server
        .delete_admin_with(
            &format!("/api/messages/{}", message.id),
            &SoftDelete {
                admin: "ops".to_string(),
            },
        )
        .await
        .unwrap();
    let envelope: Envelope<MessageBody> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(envelope.data.unwrap().deleted_by.as_deref(), Some("ops"));
}

#[tokio::test]
async fn test_restore_returns_to_inbox() {
    let server = TestServer::start().await.expect("Failed to start server");
    let message = submit(&server, &SubmitMessage::unique()).await;
    server
        .delete_admin(&format!("/api/messages/{}", message.id))
        .await
        .unwrap();

    let response = server
        .post_admin(&format!("/api/messages/{}/restore", message.id))
        .await
        .unwrap();
    let envelope: Envelope<MessageBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope.message.as_deref(), Some("Message restored"));

    let restored = envelope.data.unwrap();
    assert!(!restored.deleted);
    assert!(restored.deleted_at.is_none());
    assert!(restored.deleted_by.is_none());
    assert_eq!(restored.created_at, message.created_at);

    let inbox = list(&server, "/api/messages").await;
    assert_eq!(inbox.len(), 1);
    assert!(list(&server, "/api/messages/deleted").await.is_empty());
}

#[tokio::test]
async fn test_inbox_newest_first() {
    let server = TestServer::start().await.expect("Failed to start server");
    let first = submit(&server, &SubmitMessage::unique()).await;
    let second = submit(&server, &SubmitMessage::unique()).await;

    let inbox = list(&server, "/api/messages").await;

    assert_eq!(inbox.len(), 2);
    assert_eq!(inbox[0].id, second.id);
    assert_eq!(inbox[1].id, first.id);
}

#[tokio::test]
async fn test_get_message_in_trash() {
    let server = TestServer::start().await.expect("Failed to start server");
    let message = submit(&server, &SubmitMessage::unique()).await;
    let path = format!("/api/messages/{}", message.id);
    server.delete_admin(&path).await.unwrap();

    let response = server.get_admin(&path).await.unwrap();
    let envelope: Envelope<MessageBody> = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(envelope.data.unwrap().deleted);
}

#[tokio::test]
async fn test_delete_unknown_message() {
    let server = TestServer::start().await.expect("Failed to start server");
    submit(&server, &SubmitMessage::unique()).await;

    let response = server
        .delete_admin("/api/messages/does-not-exist")
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post_admin("/api/messages/00000000-0000-4000-8000-000000000000/restore")
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    assert_eq!(list(&server, "/api/messages").await.len(), 1);
}

#[tokio::test]
async fn test_permanent_delete() {
    let server = TestServer::start().await.expect("Failed to start server");
    let message = submit(&server, &SubmitMessage::unique()).await;
    let path = format!("/api/messages/{}/permanent", message.id);

    let response = server.delete_admin(&path).await.unwrap();
    let envelope: Envelope<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope.message.as_deref(), Some("Message permanently deleted"));

    let response = server.delete_admin(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_admin("/api/messages/stats").await.unwrap();
    let stats: Stats = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.total, 0);
}

#[tokio::test]
async fn test_permanent_delete_disabled() {
    let server = TestServer::start_with(&[("PERMANENT_DELETE_ENABLED", "false")])
        .await
        .expect("Failed to start server");
    let message = submit(&server, &SubmitMessage::unique()).await;

    let response = server
        .delete_admin(&format!("/api/messages/{}/permanent", message.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    assert_eq!(list(&server, "/api/messages").await.len(), 1);
}

#[tokio::test]
async fn test_stats() {
    let server = TestServer::start().await.expect("Failed to start server");
    let message = submit(&server, &SubmitMessage::unique()).await;
    submit(&server, &SubmitMessage::unique()).await;
    server
        .delete_admin(&format!("/api/messages/{}", message.id))
        .await
        .unwrap();

    let response = server.get_admin("/api/messages/stats").await.unwrap();
    let stats: Stats = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(stats.active, 1);
    assert_eq!(stats.trashed, 1);
    assert_eq!(stats.total, 2);
}

// ============================================================================
// Auth and Configuration Tests
// ============================================================================

#[tokio::test]
async fn test_admin_routes_require_auth() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/messages").await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let challenge = response
        .headers()
        .get("www-authenticate")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(challenge.starts_with("Basic"));

    let response = server
        .client
        .get(format!("{}/api/messages", server.base_url()))
        .basic_auth("admin", Some("wrong"))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_open_admin_mode() {
    let server = TestServer::start_with(&[("ADMIN_AUTH_MODE", "none")])
        .await
        .expect("Failed to start server");
    let message = submit(&server, &SubmitMessage::unique()).await;

    let response = server
        .client
        .delete(format!("{}/api/messages/{}", server.base_url(), message.id))
        .send()
        .await
        .unwrap();
    let envelope: Envelope<MessageBody> = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(envelope.data.unwrap().deleted_by.is_none());
}

#[tokio::test]
async fn test_ok_envelope_style() {
    let server = TestServer::start_with(&[("RESPONSE_ENVELOPE", "ok")])
        .await
        .expect("Failed to start server");

    let response = server
        .post("/api/messages", &SubmitMessage::new("Alice", "Hello"))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(body["ok"], true);
    assert!(body.get("success").is_none());
}

#[tokio::test]
async fn test_invalid_deleted_query() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get_admin("/api/messages?deleted=maybe").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body.error.code, "INVALID_QUERY_PARAMETER");
}

// ============================================================================
// PostgreSQL Store
// ============================================================================

#[tokio::test]
async fn test_postgres_lifecycle() {
    let Some(config) = postgres_config() else {
        return;
    };

    let server = TestServer::start_with_config(config.unwrap())
        .await
        .expect("Failed to start server");
    let message = submit(&server, &SubmitMessage::unique()).await;
    let path = format!("/api/messages/{}", message.id);

    let response = server.delete_admin(&path).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert!(list(&server, "/api/messages/deleted")
        .await
        .iter()
        .any(|m| m.id == message.id));

    let response = server.post_admin(&format!("{path}/restore")).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert!(list(&server, "/api/messages")
        .await
        .iter()
        .any(|m| m.id == message.id));

    let response = server.delete_admin(&format!("{path}/permanent")).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}
