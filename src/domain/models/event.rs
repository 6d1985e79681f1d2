use super::enums::EventStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub organizer_id: String,
    pub title: String,
    pub event_date: DateTime<Utc>,
    pub venue_name: String,
    pub venue_address: Option<String>,
    pub description: Option<String>,
    pub max_guests: Option<i32>,
    pub venue_capacity: Option<i32>,
    pub status: EventStatus,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event enriched with its per-status RSVP aggregates, as returned by the
/// organizer listing and detail queries.
#[derive(Debug, Serialize, FromRow)]
pub struct EventWithCounts {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub event: Event,
    pub rsvp_confirmed: i64,
    pub rsvp_pending: i64,
    pub rsvp_declined: i64,
    pub rsvp_total: i64,
}
