use crate::domain::models::{
    enums::{DietaryPreference, RsvpStatus},
    event::EventWithCounts,
    guest::{Guest, GuestWithInvitation, RsvpSummary},
};
use crate::domain::services::capacity::CapacityWarning;
use crate::domain::services::import::{ImportWarning, SkippedRow};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventWithCounts>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Serialize)]
pub struct GuestCreatedResponse {
    pub guest: Guest,
    pub rsvp_url: String,
    pub whatsapp_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<CapacityWarning>,
}

#[derive(Serialize)]
pub struct GuestListResponse {
    pub guests: Vec<GuestWithInvitation>,
    pub summary: RsvpSummary,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<CapacityWarning>,
}

#[derive(Serialize)]
pub struct GuestUpdatedResponse {
    pub guest: Guest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<CapacityWarning>,
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub imported: usize,
    pub skipped: usize,
    pub warnings: usize,
    pub details: ImportDetails,
}

#[derive(Serialize)]
pub struct ImportDetails {
    pub skipped: Vec<SkippedRow>,
    pub warnings: Vec<ImportWarning>,
}

/// Public RSVP page payload. Deliberately narrow: only what the guest-facing
/// page needs, never the full organizer records.
#[derive(Serialize)]
pub struct RsvpPageResponse {
    pub guest: RsvpGuestView,
    pub event: RsvpEventView,
}

#[derive(Serialize)]
pub struct RsvpGuestView {
    pub id: String,
    pub name_hebrew: String,
    pub name_transliteration: Option<String>,
    pub rsvp_status: RsvpStatus,
    pub dietary_preference: DietaryPreference,
    pub dietary_notes: Option<String>,
}

#[derive(Serialize)]
pub struct RsvpEventView {
    pub id: String,
    pub title: String,
    pub event_date: DateTime<Utc>,
    pub venue_name: String,
    pub venue_address: Option<String>,
}

#[derive(Serialize)]
pub struct RsvpSubmitResponse {
    pub message: String,
    pub guest: RsvpGuestView,
}
