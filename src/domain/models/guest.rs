use super::enums::{DietaryPreference, RelationshipGroup, RsvpStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Guest {
    pub id: String,
    pub event_id: String,
    pub name_hebrew: String,
    pub name_transliteration: Option<String>,
    pub email: Option<String>,
    /// Stored only in canonical +972... form (see services::phone).
    pub phone: Option<String>,
    pub rsvp_status: RsvpStatus,
    pub dietary_preference: DietaryPreference,
    pub dietary_notes: Option<String>,
    pub accessibility_needs: Option<String>,
    pub table_number: Option<i32>,
    pub seat_number: Option<i32>,
    pub relationship_group: Option<RelationshipGroup>,
    pub plus_one_allowance: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Guest row joined with its invitation, for listing and export.
#[derive(Debug, Serialize, FromRow)]
pub struct GuestWithInvitation {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub guest: Guest,
    pub token: Option<String>,
    pub whatsapp_link: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub opened_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct RsvpSummary {
    pub pending: i64,
    pub confirmed: i64,
    pub declined: i64,
    pub total: i64,
}

/// Filters for the organizer guest listing.
#[derive(Debug, Default, Clone)]
pub struct GuestListFilter {
    pub status: Option<RsvpStatus>,
    pub search: Option<String>,
}
