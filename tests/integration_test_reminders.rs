mod common;

use axum::{body::Body, http::Request};
use chrono::{Duration, Utc};
use common::{parse_body, AuthHeaders, TestApp};
use guestlist_backend::background::run_reminder_pass;
use serde_json::json;
use tower::ServiceExt;

async fn guest_token(app: &TestApp, auth: &AuthHeaders, days_out: i64, phone: Option<&str>) -> String {
    let res = app
        .authed_request(
            auth,
            "POST",
            "/api/events",
            Some(json!({
                "title": "חתונה",
                "event_date": (Utc::now() + Duration::days(days_out)).to_rfc3339(),
                "venue_name": "אולם"
            })),
        )
        .await;
    let event_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let mut guest = json!({ "name_hebrew": "יעל כהן" });
    if let Some(phone) = phone {
        guest["phone"] = json!(phone);
    }
    let res = app
        .authed_request(auth, "POST", &format!("/api/events/{event_id}/guests"), Some(guest))
        .await;
    let rsvp_url = parse_body(res).await["rsvp_url"].as_str().unwrap().to_string();
    rsvp_url.rsplit('/').next().unwrap().to_string()
}

#[tokio::test]
async fn test_reminder_pass_refreshes_links_at_thresholds() {
    let app = TestApp::new().await;
    let auth = app.auth_for("org-1");

    let token_week = guest_token(&app, &auth, 7, Some("0521234567")).await;
    let token_soon = guest_token(&app, &auth, 2, Some("0541111111")).await;
    let token_far = guest_token(&app, &auth, 20, Some("0551111111")).await;

    run_reminder_pass(&app.state).await.unwrap();

    let week_link = app
        .state
        .invitation_repo
        .find_by_token(&token_week)
        .await
        .unwrap()
        .unwrap()
        .whatsapp_link
        .unwrap();
    assert!(week_link.contains(&urlencoding::encode("עוד שבוע").into_owned()));
    // The link still points at the original token.
    assert!(week_link.contains(&token_week));

    let soon_link = app
        .state
        .invitation_repo
        .find_by_token(&token_soon)
        .await
        .unwrap()
        .unwrap()
        .whatsapp_link
        .unwrap();
    assert!(soon_link.contains(&urlencoding::encode("עוד 2 ימים").into_owned()));

    // Outside both thresholds the invitation link stays as issued.
    let far_link = app
        .state
        .invitation_repo
        .find_by_token(&token_far)
        .await
        .unwrap()
        .unwrap()
        .whatsapp_link
        .unwrap();
    assert!(!far_link.contains(&urlencoding::encode("תזכורת").into_owned()));
}

#[tokio::test]
async fn test_reminder_pass_skips_confirmed_and_phoneless_guests() {
    let app = TestApp::new().await;
    let auth = app.auth_for("org-1");

    let token_confirmed = guest_token(&app, &auth, 7, Some("0521234567")).await;
    let token_no_phone = guest_token(&app, &auth, 7, None).await;

    // Confirm the first guest via the public flow.
    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/rsvp/{token_confirmed}"))
                .header("Content-Type", "application/json")
                .body(Body::from(json!({ "rsvp_status": "confirmed" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(res.status().is_success());

    run_reminder_pass(&app.state).await.unwrap();

    let confirmed_link = app
        .state
        .invitation_repo
        .find_by_token(&token_confirmed)
        .await
        .unwrap()
        .unwrap()
        .whatsapp_link
        .unwrap();
    assert!(!confirmed_link.contains(&urlencoding::encode("תזכורת").into_owned()));

    // Guests without a phone keep a NULL link rather than getting a bogus one.
    let no_phone_link = app
        .state
        .invitation_repo
        .find_by_token(&token_no_phone)
        .await
        .unwrap()
        .unwrap()
        .whatsapp_link;
    assert!(no_phone_link.is_none());
}
