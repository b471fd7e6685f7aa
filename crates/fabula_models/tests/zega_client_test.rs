mod test_utils;

use fabula_core::ServiceConfig;
use fabula_error::{FabulaErrorKind, GenerationErrorKind};
use fabula_interface::{
    GenerationBackend, GenerationMode, Health, LearnRequest, PredictRequest,
};
use fabula_models::{UPSTREAM_BODY_LIMIT, ZegaClient};
use test_utils::StubServer;

fn client_for(server: &StubServer, token: Option<&str>) -> ZegaClient {
    let config = ServiceConfig::builder()
        .base_url(server.url())
        .token(token.map(str::to_string))
        .user_id("reader-42")
        .build()
        .expect("valid service config");
    ZegaClient::new(&config).expect("client builds")
}

fn predict_request() -> PredictRequest {
    PredictRequest::builder()
        .user_id("reader-42")
        .context("Story title and description generation")
        .instruction("Create a title")
        .mode(GenerationMode::Scene)
        .build()
        .expect("valid request")
}

#[tokio::test]
async fn predict_posts_request_and_returns_content() {
    let server = StubServer::start(200, r#"{"content": "Sure! {\"title\": \"Red Dust\"}"}"#).await;
    let client = client_for(&server, Some("secret"));

    let response = client.predict(&predict_request()).await.expect("predict succeeds");
    assert!(response.text().unwrap().contains("Red Dust"));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/predict");
    assert_eq!(request.header("authorization"), Some("Bearer secret"));

    let body: serde_json::Value = serde_json::from_str(&request.body).expect("json body");
    assert_eq!(body["user_id"], "reader-42");
    assert_eq!(body["context"], "Story title and description generation");
    assert_eq!(body["mode"], "scene");
}

#[tokio::test]
async fn predict_without_token_sends_no_authorization() {
    let server = StubServer::start(200, r#"{"response": "ok"}"#).await;
    let client = client_for(&server, None);

    let response = client.predict(&predict_request()).await.expect("predict succeeds");
    assert_eq!(response.text(), Some("ok"));
    assert!(server.requests()[0].header("authorization").is_none());
}

#[tokio::test]
async fn server_error_maps_to_upstream_with_truncated_body() {
    let long_body = "x".repeat(UPSTREAM_BODY_LIMIT * 3);
    let server = StubServer::start(500, long_body).await;
    let client = client_for(&server, Some("secret"));

    let err = client.predict(&predict_request()).await.unwrap_err();
    match err.generation_kind() {
        Some(GenerationErrorKind::Upstream { status, body }) => {
            assert_eq!(*status, 500);
            assert_eq!(body.chars().count(), UPSTREAM_BODY_LIMIT);
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_body_yields_empty_response_value() {
    let server = StubServer::start(200, "").await;
    let client = client_for(&server, None);

    let response = client.predict(&predict_request()).await.expect("predict succeeds");
    assert_eq!(response.text(), None);
}

#[tokio::test]
async fn learn_posts_to_learn_endpoint() {
    let server = StubServer::start(200, r#"{"status": "learned"}"#).await;
    let client = client_for(&server, Some("secret"));

    let request = LearnRequest::builder()
        .user_id("reader-42")
        .text("Title: Red Dust")
        .rating(5.0)
        .build()
        .expect("valid request");

    client.learn(&request).await.expect("learn succeeds");

    let requests = server.requests();
    assert_eq!(requests[0].path, "/learn");
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).expect("json body");
    assert_eq!(body["rating"], 5.0);
    assert_eq!(body["text"], "Title: Red Dust");
}

#[tokio::test]
async fn health_parses_status() {
    let server = StubServer::start(200, r#"{"status": "ZEGA is active", "version": "0.1.0-MVP"}"#).await;
    let client = client_for(&server, None);

    let status = client.health().await.expect("health succeeds");
    assert_eq!(status.status(), "ZEGA is active");
    assert_eq!(status.version().as_deref(), Some("0.1.0-MVP"));
    assert_eq!(server.requests()[0].method, "GET");
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let config = ServiceConfig::builder()
        .base_url(format!("http://{}", addr))
        .build()
        .expect("valid service config");
    let client = ZegaClient::new(&config).expect("client builds");

    let err = client.predict(&predict_request()).await.unwrap_err();
    assert!(matches!(err.kind(), FabulaErrorKind::Http(_)));
}
