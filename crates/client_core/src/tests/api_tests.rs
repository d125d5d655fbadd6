use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, StatusCode},
    routing::{get, post},
    Json, Router,
};
use shared::{domain::ResourceKind, error::ErrorCode};
use tokio::{net::TcpListener, sync::Mutex};

use super::*;
use crate::test_support::filled_submission;

#[derive(Clone)]
struct MockBackend {
    testimonials: (StatusCode, String),
    resources: (StatusCode, String),
    contact: (StatusCode, String),
    received: Arc<Mutex<Vec<ContactSubmission>>>,
}

impl MockBackend {
    fn new() -> Self {
        Self {
            testimonials: (StatusCode::OK, "[]".into()),
            resources: (StatusCode::OK, "[]".into()),
            contact: (StatusCode::OK, "{}".into()),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

type JsonReply = (StatusCode, [(header::HeaderName, &'static str); 1], String);

fn reply((status, body): &(StatusCode, String)) -> JsonReply {
    (*status, [(header::CONTENT_TYPE, "application/json")], body.clone())
}

async fn handle_testimonials(State(backend): State<MockBackend>) -> JsonReply {
    reply(&backend.testimonials)
}

async fn handle_resources(State(backend): State<MockBackend>) -> JsonReply {
    reply(&backend.resources)
}

async fn handle_contact(
    State(backend): State<MockBackend>,
    Json(body): Json<ContactSubmission>,
) -> JsonReply {
    backend.received.lock().await.push(body);
    reply(&backend.contact)
}

async fn spawn_backend(backend: MockBackend) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/api/testimonials", get(handle_testimonials))
        .route("/api/resources", get(handle_resources))
        .route("/api/contact", post(handle_contact))
        .with_state(backend);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn fetches_testimonials_from_api_prefix() {
    let mut backend = MockBackend::new();
    backend.testimonials.1 = r#"[
        {"id":"t-1","name":"Léa","role":"Élève en Terminale S","content":"Merci !","rating":5,"timestamp":"2025-02-01T09:00:00Z"},
        {"id":"t-2","name":"M. Dupont","role":"Parent d'élève","content":"Sérieux","rating":4}
    ]"#
    .into();
    let base = spawn_backend(backend).await.expect("spawn backend");

    let testimonials = HttpContentApi::new(base)
        .fetch_testimonials()
        .await
        .expect("testimonials");

    assert_eq!(testimonials.len(), 2);
    assert_eq!(testimonials[0].name, "Léa");
    assert_eq!(testimonials[0].rating, 5);
    assert!(testimonials[0].timestamp.is_some());
    assert_eq!(testimonials[1].id.0, "t-2");
}

#[tokio::test]
async fn fetches_resources_in_server_order_keeping_unknown_kinds() {
    let mut backend = MockBackend::new();
    backend.resources.1 = r#"[
        {"id":"r-1","title":"Limites","description":"Vidéo","type":"video","url":"https://youtu.be/x","category":"Mathématiques","level":"Lycée"},
        {"id":"r-2","title":"Optique","description":"Fiche","type":"pdf","url":"/api/files/r2.pdf","category":"Physique","level":"Prépa"},
        {"id":"r-3","title":"Podcast","description":"Audio","type":"audio","url":"https://example.test/a","category":"Physique","level":"Collège"}
    ]"#
    .into();
    let base = spawn_backend(backend).await.expect("spawn backend");

    let resources = HttpContentApi::new(format!("{base}/"))
        .fetch_resources()
        .await
        .expect("resources");

    assert_eq!(
        resources.iter().map(|r| r.kind).collect::<Vec<_>>(),
        vec![ResourceKind::Video, ResourceKind::Document, ResourceKind::Unknown]
    );
}

#[tokio::test]
async fn non_success_status_is_rejected() {
    let mut backend = MockBackend::new();
    backend.testimonials = (StatusCode::SERVICE_UNAVAILABLE, "".into());
    let base = spawn_backend(backend).await.expect("spawn backend");

    let err = HttpContentApi::new(base)
        .fetch_testimonials()
        .await
        .expect_err("must fail");

    assert!(err.is_rejected());
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.code(), Some(ErrorCode::Internal));
}

#[tokio::test]
async fn malformed_collection_body_is_a_decode_error() {
    let mut backend = MockBackend::new();
    backend.resources.1 = r#"{"items":[]}"#.into();
    let base = spawn_backend(backend).await.expect("spawn backend");

    let err = HttpContentApi::new(base)
        .fetch_resources()
        .await
        .expect_err("must fail");

    assert_eq!(err.kind(), "decode");
}

#[tokio::test]
async fn malformed_base_url_fails_as_transport_on_first_use() {
    let api = HttpContentApi::new("not a url");
    let err = api.fetch_testimonials().await.expect_err("must fail");
    assert!(err.is_transport(), "unexpected error: {err}");
}

#[tokio::test]
async fn unreachable_backend_fails_as_transport() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");

    let err = HttpContentApi::new(format!("http://{addr}"))
        .fetch_resources()
        .await
        .expect_err("must fail");

    assert!(err.is_transport(), "unexpected error: {err}");
}

#[tokio::test]
async fn missing_backend_fails_every_call_as_transport() {
    let api = MissingContentApi;
    assert!(api.fetch_testimonials().await.expect_err("fail").is_transport());
    assert!(api.fetch_resources().await.expect_err("fail").is_transport());
    assert!(api
        .submit_contact(&filled_submission())
        .await
        .expect_err("fail")
        .is_transport());
}

#[tokio::test]
async fn submit_contact_posts_snapshot_and_reads_receipt() {
    let mut backend = MockBackend::new();
    backend.contact.1 = r#"{"id":"6f1c9a8e-3a52-4a8f-9b0e-7d2f0a1c3b44","name":"A","email":"a@b.com","phone":"0600000000","message":"hi","timestamp":"2025-03-01T10:00:00Z"}"#.into();
    let received = Arc::clone(&backend.received);
    let base = spawn_backend(backend).await.expect("spawn backend");

    let receipt = HttpContentApi::new(base)
        .submit_contact(&filled_submission())
        .await
        .expect("submit");

    assert_eq!(received.lock().await.as_slice(), &[filled_submission()]);
    assert_eq!(
        receipt.id.as_deref(),
        Some("6f1c9a8e-3a52-4a8f-9b0e-7d2f0a1c3b44")
    );
    assert_eq!(
        receipt.timestamp,
        Some(
            chrono::DateTime::parse_from_rfc3339("2025-03-01T10:00:00Z")
                .expect("ts")
                .with_timezone(&chrono::Utc)
        )
    );
}

#[tokio::test]
async fn any_success_status_acknowledges_even_without_body() {
    let mut backend = MockBackend::new();
    backend.contact = (StatusCode::CREATED, "".into());
    let base = spawn_backend(backend).await.expect("spawn backend");

    let receipt = HttpContentApi::new(base)
        .submit_contact(&filled_submission())
        .await
        .expect("submit");

    assert_eq!(receipt, ContactReceipt::default());
}

#[tokio::test]
async fn backend_validation_failure_is_rejected_with_detail() {
    let mut backend = MockBackend::new();
    backend.contact = (
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error"}]}"#.into(),
    );
    let base = spawn_backend(backend).await.expect("spawn backend");

    let err = HttpContentApi::new(base)
        .submit_contact(&filled_submission())
        .await
        .expect_err("must fail");

    match err {
        ApiClientError::Rejected { status, error } => {
            assert_eq!(status, 422);
            assert_eq!(error.code, ErrorCode::Validation);
            assert!(error.message.contains("email"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
