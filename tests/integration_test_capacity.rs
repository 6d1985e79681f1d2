mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{parse_body, AuthHeaders, TestApp};
use guestlist_backend::domain::services::capacity;
use serde_json::json;

async fn create_event_with_capacity(app: &TestApp, auth: &AuthHeaders, capacity: i32) -> String {
    let res = app
        .authed_request(
            auth,
            "POST",
            "/api/events",
            Some(json!({
                "title": "חתונה",
                "event_date": (Utc::now() + Duration::days(30)).to_rfc3339(),
                "venue_name": "אולם",
                "venue_capacity": capacity
            })),
        )
        .await;
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

#[test]
fn test_warning_threshold_boundary() {
    assert!(capacity::evaluate(89, Some(100)).is_none());

    let warning = capacity::evaluate(90, Some(100)).expect("90% should warn");
    assert_eq!(warning.percent, 90);
    assert_eq!(warning.confirmed, 90);
    assert_eq!(warning.capacity, 100);
    assert_eq!(warning.message, "אזהרה: 90 מתוך 100 מקומות מאושרים (90%)");

    // Over-capacity still warns, with percent past 100.
    let warning = capacity::evaluate(110, Some(100)).unwrap();
    assert_eq!(warning.percent, 110);
}

#[test]
fn test_no_warning_without_capacity() {
    assert!(capacity::evaluate(1000, None).is_none());
    assert!(capacity::evaluate(1000, Some(0)).is_none());
}

#[tokio::test]
async fn test_capacity_warning_surfaces_in_responses() {
    let app = TestApp::new().await;
    let auth = app.auth_for("org-1");
    let event_id = create_event_with_capacity(&app, &auth, 10).await;

    let mut guest_ids: Vec<String> = Vec::new();
    for i in 0..9 {
        let res = app
            .authed_request(
                &auth,
                "POST",
                &format!("/api/events/{event_id}/guests"),
                Some(json!({ "name_hebrew": format!("אורח {i}") })),
            )
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body = parse_body(res).await;
        // Pending guests never trip the warning.
        assert!(body.get("warning").is_none());
        guest_ids.push(body["guest"]["id"].as_str().unwrap().to_string());
    }

    // Confirm eight guests: 8/10 is still below the threshold.
    for id in guest_ids.iter().take(8) {
        let res = app
            .authed_request(
                &auth,
                "PUT",
                &format!("/api/guests/{id}"),
                Some(json!({ "rsvp_status": "confirmed" })),
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
    let res = app
        .authed_request(&auth, "GET", &format!("/api/events/{event_id}/guests"), None)
        .await;
    let body = parse_body(res).await;
    assert!(body.get("warning").is_none());

    // The ninth confirmation crosses 90%.
    let res = app
        .authed_request(
            &auth,
            "PUT",
            &format!("/api/guests/{}", guest_ids[8]),
            Some(json!({ "rsvp_status": "confirmed" })),
        )
        .await;
    let body = parse_body(res).await;
    let warning = &body["warning"];
    assert_eq!(warning["type"], "capacity_warning");
    assert_eq!(warning["confirmed"], 9);
    assert_eq!(warning["capacity"], 10);
    assert_eq!(warning["percent"], 90);

    let res = app
        .authed_request(&auth, "GET", &format!("/api/events/{event_id}/guests"), None)
        .await;
    let body = parse_body(res).await;
    assert_eq!(body["warning"]["type"], "capacity_warning");
}
