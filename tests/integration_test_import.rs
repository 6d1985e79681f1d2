mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::{parse_body, AuthHeaders, TestApp};
use serde_json::json;
use tower::ServiceExt;

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

async fn create_event(app: &TestApp, auth: &AuthHeaders) -> String {
    let res = app
        .authed_request(
            auth,
            "POST",
            "/api/events",
            Some(json!({
                "title": "חתונה",
                "event_date": (Utc::now() + Duration::days(30)).to_rfc3339(),
                "venue_name": "אולם"
            })),
        )
        .await;
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

fn multipart_body(filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(
    app: &TestApp,
    auth: &AuthHeaders,
    event_id: &str,
    filename: &str,
    content: &[u8],
) -> axum::response::Response {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/events/{event_id}/guests/import"))
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(filename, content)))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_import_skips_bad_rows_and_continues() {
    let app = TestApp::new().await;
    let auth = app.auth_for("org-1");
    let event_id = create_event(&app, &auth).await;

    let csv = "name_hebrew,phone,email\n\
               יעל כהן,0521234567,yael@example.com\n\
               ,0529999999,missing@example.com\n\
               רון לוי,0541111111,\n";

    let res = upload(&app, &auth, &event_id, "guests.csv", csv.as_bytes()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["imported"], 2);
    assert_eq!(body["skipped"], 1);
    let skipped = body["details"]["skipped"].as_array().unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0]["row"], 2);
    assert_eq!(skipped[0]["reason"], "חסר שם בעברית");

    // The good rows landed, each with an invitation.
    let res = app
        .authed_request(&auth, "GET", &format!("/api/events/{event_id}/guests"), None)
        .await;
    let body = parse_body(res).await;
    assert_eq!(body["total"], 2);
    for guest in body["guests"].as_array().unwrap() {
        assert!(guest["token"].as_str().is_some());
    }
}

#[tokio::test]
async fn test_import_handles_bom_and_unknown_enum_values() {
    let app = TestApp::new().await;
    let auth = app.auth_for("org-1");
    let event_id = create_event(&app, &auth).await;

    let mut csv = Vec::new();
    csv.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
    csv.extend_from_slice(
        "name_hebrew,phone,dietary_preference\nיעל כהן,0521234567,pescatarian\n".as_bytes(),
    );

    let res = upload(&app, &auth, &event_id, "guests.csv", &csv).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["imported"], 1);
    assert_eq!(body["warnings"], 1);
    let warnings = body["details"]["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["row"], 1);
    assert_eq!(warnings[0]["name"], "יעל כהן");

    // Unknown preference falls back to the default.
    let res = app
        .authed_request(&auth, "GET", &format!("/api/events/{event_id}/guests"), None)
        .await;
    let body = parse_body(res).await;
    assert_eq!(body["guests"][0]["dietary_preference"], "none");
}

#[tokio::test]
async fn test_import_requires_mandatory_columns() {
    let app = TestApp::new().await;
    let auth = app.auth_for("org-1");
    let event_id = create_event(&app, &auth).await;

    let csv = "name,phone\nיעל,0521234567\n";
    let res = upload(&app, &auth, &event_id, "guests.csv", csv.as_bytes()).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "עמודת חובה חסרה בקובץ: name_hebrew");
}

#[tokio::test]
async fn test_import_rejects_oversized_files() {
    let app = TestApp::new().await;
    let auth = app.auth_for("org-1");
    let event_id = create_event(&app, &auth).await;

    let mut csv = String::from("name_hebrew,phone\n");
    for i in 0..501 {
        csv.push_str(&format!("אורח {i},05211111{i:02}\n"));
    }

    let res = upload(&app, &auth, &event_id, "guests.csv", csv.as_bytes()).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Nothing from the oversized batch was committed.
    let res = app
        .authed_request(&auth, "GET", &format!("/api/events/{event_id}/guests"), None)
        .await;
    let body = parse_body(res).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_import_rejects_unsupported_format() {
    let app = TestApp::new().await;
    let auth = app.auth_for("org-1");
    let event_id = create_event(&app, &auth).await;

    let res = upload(&app, &auth, &event_id, "guests.pdf", b"%PDF-1.4").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "פורמט קובץ לא נתמך — יש להעלות CSV או Excel");
}

#[tokio::test]
async fn test_import_rows_skip_on_missing_phone() {
    let app = TestApp::new().await;
    let auth = app.auth_for("org-1");
    let event_id = create_event(&app, &auth).await;

    let csv = "name_hebrew,phone\nיעל כהן,\n";
    let res = upload(&app, &auth, &event_id, "guests.csv", csv.as_bytes()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["imported"], 0);
    assert_eq!(body["details"]["skipped"][0]["reason"], "חסר מספר טלפון");
}
