//! HTTP surface tests
//!
//! Drives the assembled router end to end: JSON handlers, multipart
//! uploads, and the error-code envelope on failures.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use nexus_server::{Config, ServerState, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

const BOUNDARY: &str = "nexus-test-boundary";

async fn setup() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config).await.expect("state");
    (dir, build_router(state))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

fn multipart_request(method: &str, uri: &str, fields: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, filename, bytes) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(f) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn create_member(app: &Router, student_number: &str) -> i64 {
    let (status, body) = send(
        app,
        post_json(
            "/api/members",
            &json!({
                "student_number": student_number,
                "full_name": "Ana Reyes",
                "email": format!("{student_number}@example.edu.ph"),
                "year": "2",
                "block": "B",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_i64().expect("member id")
}

#[tokio::test]
async fn health_reports_healthy() {
    let (_dir, app) = setup().await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, get("/health/detailed")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["checks"]["receipt_store"]["status"], "ok");
}

#[tokio::test]
async fn full_payment_flow_over_http() {
    let (_dir, app) = setup().await;
    let member_id = create_member(&app, "2023-00001").await;

    // Register for the term
    let (status, body) = send(
        &app,
        post_json(
            "/api/memberships",
            &json!({
                "member_id": member_id,
                "term_id": "2024-2025",
                "tier": "REGULAR",
                "amount": 150.0,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "NOT_PAID");

    // Upload the receipt blob first
    let (status, body) = send(
        &app,
        multipart_request(
            "POST",
            "/api/receipts",
            &[("file", Some("receipt.jpg"), b"fake image bytes")],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let receipt_ref = body["receipt_ref"].as_str().expect("receipt ref").to_string();

    // Submit the payment
    let uri = format!("/api/memberships/{member_id}/2024-2025/submit");
    let (status, body) = send(
        &app,
        post_json(
            &uri,
            &json!({ "payment_method": "GCASH", "receipt_ref": receipt_ref }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "VERIFYING");
    assert_eq!(body["payment_method"], "GCASH");

    // Officer accepts
    let uri = format!("/api/memberships/{member_id}/2024-2025/decide");
    let (status, body) = send(
        &app,
        post_json(&uri, &json!({ "officer_id": 7, "outcome": "accept" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "COMPLETED");
    assert_eq!(body["decided_by"], 7);

    // Second decision is refused with the state-machine error envelope
    let (status, body) = send(
        &app,
        post_json(&uri, &json!({ "officer_id": 8, "outcome": "reject" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 2004);

    // Status projection shows the full history
    let uri = format!("/api/memberships/{member_id}/2024-2025");
    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "COMPLETED");
    assert_eq!(body["full_name"], "Ana Reyes");
    assert_eq!(body["history"].as_array().unwrap().len(), 2);

    // Officer can fetch the stored receipt bytes
    let uri = format!("/api/receipts/{}", body["receipt_ref"].as_str().unwrap());
    let resp = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"fake image bytes");
}

#[tokio::test]
async fn unknown_membership_is_a_coded_404() {
    let (_dir, app) = setup().await;

    let (status, body) = send(&app, get("/api/memberships/12345/2024-2025")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 2001);
}

#[tokio::test]
async fn duplicate_student_number_is_a_coded_conflict() {
    let (_dir, app) = setup().await;
    create_member(&app, "2023-00002").await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/members",
            &json!({
                "student_number": "2023-00002",
                "full_name": "Someone Else",
                "email": "someone.else@example.edu.ph",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1002);
}

#[tokio::test]
async fn qr_codes_round_trip_per_rail() {
    let (_dir, app) = setup().await;

    // Nothing uploaded yet
    let (status, body) = send(&app, get("/api/qrcodes/gcash")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3002);

    // Unknown rail is rejected outright
    let (status, body) = send(&app, get("/api/qrcodes/stripe")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3001);

    // Officer uploads the GCash code
    let (status, body) = send(
        &app,
        multipart_request(
            "PUT",
            "/api/qrcodes",
            &[
                ("payment_method", None, b"gcash"),
                ("file", Some("gcash-qr.png"), b"qr image bytes"),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let qr_ref = body["qr_ref"].as_str().expect("qr ref").to_string();

    let (status, body) = send(&app, get("/api/qrcodes/gcash")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["qr_ref"], qr_ref.as_str());

    // The other rail is still empty
    let (status, _) = send(&app, get("/api/qrcodes/paymaya")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn receipt_upload_requires_a_file_field() {
    let (_dir, app) = setup().await;

    let (status, body) = send(
        &app,
        multipart_request("POST", "/api/receipts", &[("other", None, b"not a file")]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3104);
}

#[tokio::test]
async fn event_join_respects_the_registration_window() {
    let (_dir, app) = setup().await;
    let member_id = create_member(&app, "2023-00004").await;
    let now = shared::util::now_millis();

    // Window already closed
    let (status, body) = send(
        &app,
        post_json(
            "/api/events",
            &json!({
                "title": "Closed Event",
                "description": "Registration over",
                "location": null,
                "starts_at": now + 60_000,
                "registration_start": now - 120_000,
                "registration_end": now - 60_000,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let closed_id = body["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        post_json(
            &format!("/api/events/{closed_id}/join"),
            &json!({ "member_id": member_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 4003);

    // Window not yet open
    let (status, body) = send(
        &app,
        post_json(
            "/api/events",
            &json!({
                "title": "Future Event",
                "description": "Registration later",
                "location": null,
                "starts_at": now + 120_000,
                "registration_start": now + 60_000,
                "registration_end": null,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let future_id = body["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        post_json(
            &format!("/api/events/{future_id}/join"),
            &json!({ "member_id": member_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 4002);

    // Open window joins, idempotently
    let (status, body) = send(
        &app,
        post_json(
            "/api/events",
            &json!({
                "title": "Open Event",
                "description": "Registration open",
                "location": "Gym",
                "starts_at": now + 120_000,
                "registration_start": null,
                "registration_end": null,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let open_id = body["id"].as_i64().unwrap();

    let uri = format!("/api/events/{open_id}/join");
    let (status, body) = send(&app, post_json(&uri, &json!({ "member_id": member_id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "JOINED");

    let (status, body) = send(&app, post_json(&uri, &json!({ "member_id": member_id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "ALREADY_JOINED");
}

#[tokio::test]
async fn dashboard_aggregates_reads() {
    let (_dir, app) = setup().await;
    let member_id = create_member(&app, "2023-00003").await;

    send(
        &app,
        post_json(
            "/api/memberships",
            &json!({
                "member_id": member_id,
                "term_id": "2024-2025",
                "tier": "ASSOCIATE",
                "amount": null,
            }),
        ),
    )
    .await;

    let uri = format!("/api/dashboard/{member_id}/2024-2025");
    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["member"]["full_name"], "Ana Reyes");
    assert_eq!(body["membership"]["status"], "NOT_PAID");
    assert_eq!(body["upcoming_event_count"], 0);
    assert!(body["announcements"].as_array().unwrap().is_empty());
}
