use crate::api::dtos::requests::RsvpSubmitRequest;
use crate::api::dtos::responses::{RsvpEventView, RsvpGuestView, RsvpPageResponse, RsvpSubmitResponse};
use crate::domain::models::enums::{DietaryPreference, RsvpStatus};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Public invitation page data, keyed only by the unguessable token. First
/// resolution stamps opened_at.
pub async fn get_rsvp_page(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let invitation = state
        .invitation_repo
        .find_by_token(&token)
        .await?
        .ok_or(AppError::NotFound("קישור ההזמנה לא נמצא".into()))?;

    let guest = state
        .guest_repo
        .find_by_id(&invitation.guest_id)
        .await?
        .ok_or(AppError::NotFound("קישור ההזמנה לא נמצא".into()))?;

    let event = state
        .event_repo
        .find_any(&guest.event_id)
        .await?
        .ok_or(AppError::NotFound("קישור ההזמנה לא נמצא".into()))?;

    // A cancelled event's invitation page behaves like a dead link.
    if event.deleted_at.is_some() {
        return Err(AppError::NotFound("קישור ההזמנה לא נמצא".into()));
    }

    state.invitation_repo.mark_opened(&token).await?;

    Ok(Json(RsvpPageResponse {
        guest: RsvpGuestView {
            id: guest.id,
            name_hebrew: guest.name_hebrew,
            name_transliteration: guest.name_transliteration,
            rsvp_status: guest.rsvp_status,
            dietary_preference: guest.dietary_preference,
            dietary_notes: guest.dietary_notes,
        },
        event: RsvpEventView {
            id: event.id,
            title: event.title,
            event_date: event.event_date,
            venue_name: event.venue_name,
            venue_address: event.venue_address,
        },
    }))
}

/// Guest-facing RSVP submission. Idempotent: re-submitting overwrites the
/// previous answer, last write wins.
pub async fn submit_rsvp(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    Json(payload): Json<RsvpSubmitRequest>,
) -> Result<impl IntoResponse, AppError> {
    let rsvp_status = match RsvpStatus::from_str(&payload.rsvp_status) {
        Ok(status @ (RsvpStatus::Confirmed | RsvpStatus::Declined)) => status,
        _ => return Err(AppError::Validation("נא לבחור אישור או דחייה".into())),
    };

    let dietary_preference = match payload.dietary_preference.as_deref() {
        Some(raw) => Some(
            DietaryPreference::from_str(raw)
                .map_err(|_| AppError::Validation("סוג תזונה לא תקין".into()))?,
        ),
        None => None,
    };

    let invitation = state
        .invitation_repo
        .find_by_token(&token)
        .await?
        .ok_or(AppError::NotFound("קישור ההזמנה לא נמצא".into()))?;

    let mut guest = state
        .guest_repo
        .find_by_id(&invitation.guest_id)
        .await?
        .ok_or(AppError::NotFound("קישור ההזמנה לא נמצא".into()))?;

    let event = state
        .event_repo
        .find_any(&guest.event_id)
        .await?
        .ok_or(AppError::NotFound("קישור ההזמנה לא נמצא".into()))?;

    if event.deleted_at.is_some() {
        return Err(AppError::Gone("האירוע בוטל".into()));
    }

    guest.rsvp_status = rsvp_status;
    if let Some(pref) = dietary_preference {
        guest.dietary_preference = pref;
    }
    if let Some(notes) = payload.dietary_notes {
        guest.dietary_notes = Some(notes);
    }

    let updated = state.guest_repo.update(&guest).await?;
    info!("RSVP recorded for guest {}: {}", updated.id, updated.rsvp_status);

    let message = if rsvp_status == RsvpStatus::Confirmed {
        "תודה! הגעתך אושרה."
    } else {
        "תודה! עדכנו את מצבך."
    };

    Ok(Json(RsvpSubmitResponse {
        message: message.to_string(),
        guest: RsvpGuestView {
            id: updated.id,
            name_hebrew: updated.name_hebrew,
            name_transliteration: updated.name_transliteration,
            rsvp_status: updated.rsvp_status,
            dietary_preference: updated.dietary_preference,
            dietary_notes: updated.dietary_notes,
        },
    }))
}
