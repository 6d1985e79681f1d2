use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Generate an unguessable RSVP token: 128 bits from the OS CSPRNG,
/// hex-encoded to a fixed 32 characters. The token is issued once per guest
/// and never rotated; reminders only refresh the deep-link.
pub fn generate_rsvp_token() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Invitation {
    pub id: String,
    pub event_id: String,
    pub guest_id: String,
    pub token: String,
    pub channel: String,
    pub whatsapp_link: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub opened_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    pub fn new(event_id: String, guest_id: String, whatsapp_link: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            guest_id,
            token: generate_rsvp_token(),
            channel: "whatsapp".to_string(),
            whatsapp_link,
            sent_at: None,
            opened_at: None,
            created_at: Utc::now(),
        }
    }
}

/// Pending guest joined with its invitation and event, as loaded by the
/// reminder worker.
#[derive(Debug, FromRow)]
pub struct PendingReminder {
    pub guest_id: String,
    pub name_hebrew: String,
    pub phone: Option<String>,
    pub token: String,
    pub title: String,
    pub event_date: DateTime<Utc>,
}
