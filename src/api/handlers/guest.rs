use crate::api::dtos::requests::{CreateGuestRequest, GuestListQuery, UpdateGuestRequest};
use crate::api::dtos::responses::{GuestCreatedResponse, GuestListResponse, GuestUpdatedResponse};
use crate::api::extractors::auth::AuthOrganizer;
use crate::domain::models::enums::{DietaryPreference, RelationshipGroup, RsvpStatus};
use crate::domain::models::guest::GuestListFilter;
use crate::domain::services::{capacity, export, guest_service, phone};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

pub async fn create_guest(
    State(state): State<Arc<AppState>>,
    AuthOrganizer(organizer): AuthOrganizer,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateGuestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state
        .event_repo
        .find_owned(&organizer.id, &event_id)
        .await?
        .ok_or(AppError::NotFound("האירוע לא נמצא".into()))?;

    let dietary_preference = match payload.dietary_preference.as_deref() {
        Some(raw) => DietaryPreference::from_str(raw)
            .map_err(|_| AppError::Validation("סוג תזונה לא תקין".into()))?,
        None => DietaryPreference::default(),
    };
    let relationship_group = match payload.relationship_group.as_deref() {
        Some(raw) => Some(
            RelationshipGroup::from_str(raw)
                .map_err(|_| AppError::Validation("קבוצת יחסים לא תקינה".into()))?,
        ),
        None => None,
    };

    let new_guest = guest_service::NewGuest {
        name_hebrew: payload.name_hebrew,
        name_transliteration: payload.name_transliteration,
        email: payload.email,
        phone: payload.phone,
        relationship_group,
        dietary_preference,
        dietary_notes: payload.dietary_notes,
        accessibility_needs: payload.accessibility_needs,
        table_number: payload.table_number,
        seat_number: payload.seat_number,
        plus_one_allowance: payload.plus_one_allowance.unwrap_or(0),
    };

    let created = guest_service::create_guest(
        &state.guest_repo,
        &state.invitation_repo,
        &state.config.app_base_url,
        &event,
        new_guest,
    )
    .await?;

    let confirmed = state.guest_repo.count_confirmed(&event.id).await?;
    let warning = capacity::evaluate(confirmed, event.venue_capacity);

    info!("Added guest {} to event {}", created.guest.id, event.id);

    Ok((
        StatusCode::CREATED,
        Json(GuestCreatedResponse {
            guest: created.guest,
            rsvp_url: created.rsvp_url,
            whatsapp_link: created.whatsapp_link,
            warning,
        }),
    ))
}

pub async fn list_guests(
    State(state): State<Arc<AppState>>,
    AuthOrganizer(organizer): AuthOrganizer,
    Path(event_id): Path<String>,
    Query(query): Query<GuestListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let event = state
        .event_repo
        .find_owned(&organizer.id, &event_id)
        .await?
        .ok_or(AppError::NotFound("האירוע לא נמצא".into()))?;

    let status = match query.status.as_deref() {
        Some(raw) => Some(
            RsvpStatus::from_str(raw)
                .map_err(|_| AppError::Validation("סטטוס RSVP לא תקין".into()))?,
        ),
        None => None,
    };

    let filter = GuestListFilter {
        status,
        search: query.search.filter(|s| !s.trim().is_empty()),
    };

    let page = query.page.unwrap_or(1).clamp(1, 100_000);
    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let offset = (page - 1) * limit;

    let guests = state.guest_repo.list(&event.id, &filter, limit, offset).await?;
    let total = state.guest_repo.count(&event.id, &filter).await?;
    let summary = state.guest_repo.rsvp_summary(&event.id).await?;
    let warning = capacity::evaluate(summary.confirmed, event.venue_capacity);

    Ok(Json(GuestListResponse {
        guests,
        summary,
        total,
        page,
        limit,
        warning,
    }))
}

pub async fn update_guest(
    State(state): State<Arc<AppState>>,
    AuthOrganizer(organizer): AuthOrganizer,
    Path(guest_id): Path<String>,
    Json(payload): Json<UpdateGuestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut guest = state
        .guest_repo
        .find_owned(&organizer.id, &guest_id)
        .await?
        .ok_or(AppError::NotFound("האורח לא נמצא".into()))?;

    if let Some(raw) = payload.rsvp_status.as_deref() {
        guest.rsvp_status = RsvpStatus::from_str(raw)
            .map_err(|_| AppError::Validation("סטטוס RSVP לא תקין".into()))?;
    }
    if let Some(raw) = payload.dietary_preference.as_deref() {
        guest.dietary_preference = DietaryPreference::from_str(raw)
            .map_err(|_| AppError::Validation("סוג תזונה לא תקין".into()))?;
    }
    if let Some(raw) = payload.relationship_group.as_deref() {
        guest.relationship_group = Some(
            RelationshipGroup::from_str(raw)
                .map_err(|_| AppError::Validation("קבוצת יחסים לא תקינה".into()))?,
        );
    }

    if let Some(name_hebrew) = payload.name_hebrew {
        let name_hebrew = name_hebrew.trim().to_string();
        if name_hebrew.is_empty() {
            return Err(AppError::Validation("שם בעברית הוא שדה חובה".into()));
        }
        guest.name_hebrew = name_hebrew;
    }
    if let Some(name_transliteration) = payload.name_transliteration {
        guest.name_transliteration = Some(name_transliteration);
    }
    if let Some(email) = payload.email {
        guest.email = Some(email.trim().to_lowercase());
    }
    if let Some(raw_phone) = payload.phone {
        guest.phone = phone::normalize(&raw_phone);
    }
    if let Some(dietary_notes) = payload.dietary_notes {
        guest.dietary_notes = Some(dietary_notes);
    }
    if let Some(accessibility_needs) = payload.accessibility_needs {
        guest.accessibility_needs = Some(accessibility_needs);
    }
    if let Some(table_number) = payload.table_number {
        guest.table_number = Some(table_number);
    }
    if let Some(seat_number) = payload.seat_number {
        guest.seat_number = Some(seat_number);
    }
    if let Some(plus_one_allowance) = payload.plus_one_allowance {
        guest.plus_one_allowance = plus_one_allowance;
    }

    let updated = state.guest_repo.update(&guest).await?;

    // The status may have flipped to confirmed, so re-check capacity.
    let warning = match state.event_repo.find_any(&updated.event_id).await? {
        Some(event) => {
            let confirmed = state.guest_repo.count_confirmed(&event.id).await?;
            capacity::evaluate(confirmed, event.venue_capacity)
        }
        None => None,
    };

    info!("Updated guest {}", updated.id);
    Ok(Json(GuestUpdatedResponse {
        guest: updated,
        warning,
    }))
}

pub async fn delete_guest(
    State(state): State<Arc<AppState>>,
    AuthOrganizer(organizer): AuthOrganizer,
    Path(guest_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let guest = state
        .guest_repo
        .find_owned(&organizer.id, &guest_id)
        .await?
        .ok_or(AppError::NotFound("האורח לא נמצא".into()))?;

    state.guest_repo.delete(&guest.id).await?;
    info!("Deleted guest {}", guest.id);
    Ok(Json(serde_json::json!({ "message": "האורח נמחק בהצלחה" })))
}

pub async fn export_guests(
    State(state): State<Arc<AppState>>,
    AuthOrganizer(organizer): AuthOrganizer,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state
        .event_repo
        .find_owned(&organizer.id, &event_id)
        .await?
        .ok_or(AppError::NotFound("האירוע לא נמצא".into()))?;

    let guests = state.guest_repo.list_for_export(&event.id).await?;
    let csv_bytes = export::to_csv(&guests)?;

    info!("Exported {} guests for event {}", guests.len(), event.id);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"guests-{}.csv\"", event.id),
            ),
        ],
        csv_bytes,
    ))
}
