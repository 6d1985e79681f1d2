use crate::domain::models::{
    enums::{DietaryPreference, RelationshipGroup, RsvpStatus},
    event::Event,
    guest::Guest,
    invitation::Invitation,
};
use crate::domain::ports::{GuestRepository, InvitationRepository};
use crate::domain::services::{invitation, phone};
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Validated input for guest creation, shared by the organizer API and the
/// bulk import engine.
#[derive(Debug, Default)]
pub struct NewGuest {
    pub name_hebrew: String,
    pub name_transliteration: Option<String>,
    pub email: Option<String>,
    /// Raw phone as supplied; normalized here.
    pub phone: Option<String>,
    pub relationship_group: Option<RelationshipGroup>,
    pub dietary_preference: DietaryPreference,
    pub dietary_notes: Option<String>,
    pub accessibility_needs: Option<String>,
    pub table_number: Option<i32>,
    pub seat_number: Option<i32>,
    pub plus_one_allowance: i32,
}

pub struct CreatedGuest {
    pub guest: Guest,
    pub rsvp_url: String,
    pub whatsapp_link: Option<String>,
}

/// Creates the guest row and issues its invitation in one go: token,
/// confirmation URL, and the wa.me deep-link when a phone is present.
pub async fn create_guest(
    guest_repo: &Arc<dyn GuestRepository>,
    invitation_repo: &Arc<dyn InvitationRepository>,
    app_base_url: &str,
    event: &Event,
    new: NewGuest,
) -> Result<CreatedGuest, AppError> {
    let name_hebrew = new.name_hebrew.trim().to_string();
    if name_hebrew.is_empty() {
        return Err(AppError::Validation("שם בעברית הוא שדה חובה".into()));
    }

    let normalized_phone = phone::normalize_opt(new.phone.as_deref());
    let now = Utc::now();

    let guest = Guest {
        id: Uuid::new_v4().to_string(),
        event_id: event.id.clone(),
        name_hebrew,
        name_transliteration: new
            .name_transliteration
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        email: new.email.as_deref().map(|e| e.trim().to_lowercase()).filter(|e| !e.is_empty()),
        phone: normalized_phone.clone(),
        rsvp_status: RsvpStatus::Pending,
        dietary_preference: new.dietary_preference,
        dietary_notes: new.dietary_notes,
        accessibility_needs: new.accessibility_needs,
        table_number: new.table_number,
        seat_number: new.seat_number,
        relationship_group: new.relationship_group,
        plus_one_allowance: new.plus_one_allowance,
        created_at: now,
        updated_at: now,
    };

    let created = guest_repo.create(&guest).await?;

    let mut invitation_row = Invitation::new(event.id.clone(), created.id.clone(), None);
    let rsvp_url = invitation::rsvp_url(app_base_url, &invitation_row.token);
    let whatsapp_link = normalized_phone
        .as_deref()
        .map(|p| invitation::build_whatsapp_link(p, &event.title, &rsvp_url));
    invitation_row.whatsapp_link = whatsapp_link.clone();
    invitation_repo.create(&invitation_row).await?;

    Ok(CreatedGuest {
        guest: created,
        rsvp_url,
        whatsapp_link,
    })
}
