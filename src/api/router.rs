use crate::api::handlers::{event, guest, guest_import, health, rsvp};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Events (organizer)
        .route("/api/events", post(event::create_event).get(event::list_events))
        .route("/api/events/{event_id}", get(event::get_event).put(event::update_event).delete(event::delete_event))

        // Guests (organizer)
        .route("/api/events/{event_id}/guests", post(guest::create_guest).get(guest::list_guests))
        .route("/api/events/{event_id}/guests/import", post(guest_import::import_guests))
        .route("/api/events/{event_id}/guests/export", get(guest::export_guests))
        .route("/api/guests/{guest_id}", put(guest::update_guest).delete(guest::delete_guest))

        // Public RSVP flow (token-keyed, no auth)
        .route("/api/rsvp/{token}", get(rsvp::get_rsvp_page).post(rsvp::submit_rsvp))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        organizer_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
