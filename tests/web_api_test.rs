//! Integration tests for the HTTP surface: settings API and the publish
//! event trigger.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use discord_post_announcer::db::{self, Database};
use discord_post_announcer::discord::WebhookClient;
use discord_post_announcer::hooks::Hooks;
use discord_post_announcer::publisher::Publisher;
use discord_post_announcer::settings::keys;
use discord_post_announcer::web::{create_app, AppState};
use tempfile::TempDir;
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.sqlite");
    let db = Database::new(&db_path)
        .await
        .expect("Failed to create database");
    (db, temp_dir)
}

fn app(db: &Database) -> Router {
    let publisher = Publisher::new(
        db.clone(),
        WebhookClient::new(Duration::from_secs(5)),
        Hooks::new(),
    );
    create_app(AppState {
        db: db.clone(),
        publisher: Arc::new(publisher),
    })
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_healthz() {
    let (db, _tmp) = setup_db().await;
    let response = app(&db)
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_settings_returns_blank_defaults() {
    let (db, _tmp) = setup_db().await;
    let response = app(&db)
        .oneshot(Request::builder().uri("/settings").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["webhook_url"], "");
    assert_eq!(json["mention_everyone"], false);
    assert_eq!(json["supported_post_types"], serde_json::json!([]));
}

#[tokio::test]
async fn test_put_settings_updates_store() {
    let (db, _tmp) = setup_db().await;

    let response = app(&db)
        .oneshot(json_request(
            "PUT",
            "/settings",
            serde_json::json!({
                "webhook_url": "https://discord.com/api/webhooks/1/token",
                "mention_everyone": true,
                "supported_post_types": ["post"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["webhook_url"], "https://discord.com/api/webhooks/1/token");
    assert_eq!(json["mention_everyone"], true);
    assert_eq!(json["supported_post_types"], serde_json::json!(["post"]));

    // Untouched fields keep their values.
    assert_eq!(json["bot_username"], "");
    assert_eq!(
        db::get_setting(db.pool(), keys::MENTION_EVERYONE).await.unwrap(),
        Some("yes".to_string())
    );
}

#[tokio::test]
async fn test_put_settings_rejects_invalid_webhook_url() {
    let (db, _tmp) = setup_db().await;

    let response = app(&db)
        .oneshot(json_request(
            "PUT",
            "/settings",
            serde_json::json!({ "webhook_url": "not a url" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was written.
    assert_eq!(
        db::get_setting(db.pool(), keys::WEBHOOK_URL).await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_put_settings_allows_blank_webhook_url() {
    let (db, _tmp) = setup_db().await;

    let response = app(&db)
        .oneshot(json_request(
            "PUT",
            "/settings",
            serde_json::json!({ "webhook_url": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_publish_event_delivers_and_returns_accepted() {
    let (db, _tmp) = setup_db().await;
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    db::set_setting(db.pool(), keys::WEBHOOK_URL, &format!("{}/webhook", mock_server.uri()))
        .await
        .unwrap();
    db::set_setting(db.pool(), keys::SUPPORTED_POST_TYPES, r#"["post"]"#)
        .await
        .unwrap();

    let event = serde_json::json!({
        "post_id": 7,
        "post": {
            "id": 7,
            "post_type": "post",
            "title": "Hello World",
            "author": "Admin",
            "permalink": "https://example.com/hello-world",
            "categories": ["News"],
            "tags": []
        }
    });

    let response = app(&db)
        .oneshot(json_request("POST", "/events/post-published", event))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert!(db::is_announced(db.pool(), 7).await.unwrap());
}

#[tokio::test]
async fn test_publish_event_delivery_failure_still_accepted() {
    let (db, _tmp) = setup_db().await;

    db::set_setting(db.pool(), keys::WEBHOOK_URL, "http://127.0.0.1:1/webhook")
        .await
        .unwrap();
    db::set_setting(db.pool(), keys::SUPPORTED_POST_TYPES, r#"["post"]"#)
        .await
        .unwrap();

    let event = serde_json::json!({
        "post_id": 8,
        "post": {
            "id": 8,
            "post_type": "post",
            "title": "Hello",
            "author": "Admin",
            "permalink": "https://example.com/hello"
        }
    });

    let response = app(&db)
        .oneshot(json_request("POST", "/events/post-published", event))
        .await
        .unwrap();

    // Fire and forget: the host never sees delivery failures.
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert!(!db::is_announced(db.pool(), 8).await.unwrap());
}

#[tokio::test]
async fn test_publish_event_rejects_malformed_payload() {
    let (db, _tmp) = setup_db().await;

    let response = app(&db)
        .oneshot(json_request(
            "POST",
            "/events/post-published",
            serde_json::json!({ "post_id": "not a number" }),
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
