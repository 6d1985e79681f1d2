use crate::domain::models::{
    enums::EventStatus,
    event::{Event, EventWithCounts},
    guest::{Guest, GuestListFilter, GuestWithInvitation, RsvpSummary},
    invitation::{Invitation, PendingReminder},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    /// Owner-scoped lookup; soft-deleted events are invisible here.
    async fn find_owned(&self, organizer_id: &str, id: &str) -> Result<Option<Event>, AppError>;
    /// Unscoped lookup that also resolves soft-deleted events, for the
    /// token-authenticated RSVP flow.
    async fn find_any(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn find_owned_with_counts(
        &self,
        organizer_id: &str,
        id: &str,
    ) -> Result<Option<EventWithCounts>, AppError>;
    async fn list_with_counts(
        &self,
        organizer_id: &str,
        status: Option<EventStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EventWithCounts>, AppError>;
    async fn count(&self, organizer_id: &str, status: Option<EventStatus>) -> Result<i64, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    /// Marks the event cancelled and stamps deleted_at; guests and
    /// invitations are kept so issued tokens keep resolving (to 410).
    async fn soft_delete(&self, organizer_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Guest>, AppError>;
    /// Guest whose event is owned by the organizer and not soft-deleted.
    async fn find_owned(&self, organizer_id: &str, id: &str) -> Result<Option<Guest>, AppError>;
    async fn list(
        &self,
        event_id: &str,
        filter: &GuestListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<GuestWithInvitation>, AppError>;
    async fn count(&self, event_id: &str, filter: &GuestListFilter) -> Result<i64, AppError>;
    async fn rsvp_summary(&self, event_id: &str) -> Result<RsvpSummary, AppError>;
    async fn count_confirmed(&self, event_id: &str) -> Result<i64, AppError>;
    async fn update(&self, guest: &Guest) -> Result<Guest, AppError>;
    /// Hard delete; the invitation row goes with it. No tombstone.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    /// All guests of the event with invitation columns, ordered by Hebrew
    /// name, for CSV export.
    async fn list_for_export(&self, event_id: &str) -> Result<Vec<GuestWithInvitation>, AppError>;
    /// Pending guests of live future events, for the reminder worker.
    async fn find_pending_reminders(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<PendingReminder>, AppError>;
}

#[async_trait]
pub trait InvitationRepository: Send + Sync {
    async fn create(&self, invitation: &Invitation) -> Result<Invitation, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Invitation>, AppError>;
    /// Stamps opened_at on first resolution only; later calls are no-ops.
    async fn mark_opened(&self, token: &str) -> Result<(), AppError>;
    /// Refreshes the deep-link without touching the token.
    async fn update_link(&self, token: &str, whatsapp_link: &str) -> Result<(), AppError>;
}
