use crate::api::dtos::requests::{CreateEventRequest, EventListQuery, UpdateEventRequest};
use crate::api::dtos::responses::EventListResponse;
use crate::api::extractors::auth::AuthOrganizer;
use crate::domain::models::{enums::EventStatus, event::Event};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AuthOrganizer(organizer): AuthOrganizer,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let title = payload.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Validation("שם האירוע הוא שדה חובה".into()));
    }
    let venue_name = payload.venue_name.trim().to_string();
    if venue_name.is_empty() {
        return Err(AppError::Validation("שם המקום הוא שדה חובה".into()));
    }
    if payload.event_date < Utc::now() {
        return Err(AppError::Validation("לא ניתן ליצור אירוע בתאריך עבר".into()));
    }

    let now = Utc::now();
    let event = Event {
        id: Uuid::new_v4().to_string(),
        organizer_id: organizer.id.clone(),
        title,
        event_date: payload.event_date,
        venue_name,
        venue_address: payload.venue_address,
        description: payload.description,
        max_guests: payload.max_guests,
        venue_capacity: payload.venue_capacity,
        status: EventStatus::Draft,
        deleted_at: None,
        created_at: now,
        updated_at: now,
    };

    let created = state.event_repo.create(&event).await?;
    info!("Created event {} for organizer {}", created.id, organizer.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    AuthOrganizer(organizer): AuthOrganizer,
    Query(query): Query<EventListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(
            EventStatus::from_str(raw)
                .map_err(|_| AppError::Validation("סטטוס לא תקין".into()))?,
        ),
        None => None,
    };

    let page = query.page.unwrap_or(1).clamp(1, 100_000);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * limit;

    let events = state
        .event_repo
        .list_with_counts(&organizer.id, status, limit, offset)
        .await?;
    let total = state.event_repo.count(&organizer.id, status).await?;

    Ok(Json(EventListResponse {
        events,
        total,
        page,
        limit,
    }))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    AuthOrganizer(organizer): AuthOrganizer,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state
        .event_repo
        .find_owned_with_counts(&organizer.id, &event_id)
        .await?
        .ok_or(AppError::NotFound("האירוע לא נמצא".into()))?;

    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    AuthOrganizer(organizer): AuthOrganizer,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state
        .event_repo
        .find_owned(&organizer.id, &event_id)
        .await?
        .ok_or(AppError::NotFound("האירוע לא נמצא".into()))?;

    if event.status == EventStatus::Cancelled {
        return Err(AppError::Validation("לא ניתן לערוך אירוע שבוטל".into()));
    }

    let next_status = match payload.status.as_deref() {
        Some(raw) => {
            let next = EventStatus::from_str(raw)
                .map_err(|_| AppError::Validation("סטטוס לא תקין".into()))?;
            if !event.status.can_transition_to(next) {
                return Err(AppError::Validation(format!(
                    "לא ניתן לשנות מ-{} ל-{}",
                    event.status, next
                )));
            }
            Some(next)
        }
        None => None,
    };

    if let Some(date) = payload.event_date {
        // Past dates stay valid when the event is being closed out.
        let closing = matches!(
            next_status,
            Some(EventStatus::Cancelled) | Some(EventStatus::Completed)
        );
        if date < Utc::now() && !closing {
            return Err(AppError::Validation("לא ניתן לקבוע תאריך בעבר".into()));
        }
        event.event_date = date;
    }

    if let Some(title) = payload.title {
        event.title = title;
    }
    if let Some(venue_name) = payload.venue_name {
        event.venue_name = venue_name;
    }
    if let Some(venue_address) = payload.venue_address {
        event.venue_address = Some(venue_address);
    }
    if let Some(description) = payload.description {
        event.description = Some(description);
    }
    if let Some(max_guests) = payload.max_guests {
        event.max_guests = Some(max_guests);
    }
    if let Some(venue_capacity) = payload.venue_capacity {
        event.venue_capacity = Some(venue_capacity);
    }
    if let Some(next) = next_status {
        event.status = next;
        // Cancellation doubles as the soft delete: the event drops out of
        // organizer queries and issued RSVP tokens go inert.
        if next == EventStatus::Cancelled {
            event.deleted_at = Some(Utc::now());
        }
    }

    let updated = state.event_repo.update(&event).await?;
    info!("Updated event {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    AuthOrganizer(organizer): AuthOrganizer,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_repo.soft_delete(&organizer.id, &event_id).await?;
    info!("Soft-deleted event {}", event_id);
    Ok(StatusCode::NO_CONTENT)
}
