use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateEventRequest {
    pub title: String,
    pub event_date: DateTime<Utc>,
    pub venue_name: String,
    pub venue_address: Option<String>,
    pub description: Option<String>,
    pub max_guests: Option<i32>,
    pub venue_capacity: Option<i32>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub description: Option<String>,
    pub max_guests: Option<i32>,
    pub venue_capacity: Option<i32>,
    /// Target status; validated against the transition graph.
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct EventListQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateGuestRequest {
    pub name_hebrew: String,
    pub name_transliteration: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub relationship_group: Option<String>,
    pub dietary_preference: Option<String>,
    pub dietary_notes: Option<String>,
    pub accessibility_needs: Option<String>,
    pub table_number: Option<i32>,
    pub seat_number: Option<i32>,
    pub plus_one_allowance: Option<i32>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateGuestRequest {
    pub name_hebrew: Option<String>,
    pub name_transliteration: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rsvp_status: Option<String>,
    pub relationship_group: Option<String>,
    pub dietary_preference: Option<String>,
    pub dietary_notes: Option<String>,
    pub accessibility_needs: Option<String>,
    pub table_number: Option<i32>,
    pub seat_number: Option<i32>,
    pub plus_one_allowance: Option<i32>,
}

#[derive(Deserialize)]
pub struct GuestListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RsvpSubmitRequest {
    pub rsvp_status: String,
    pub dietary_preference: Option<String>,
    pub dietary_notes: Option<String>,
}
