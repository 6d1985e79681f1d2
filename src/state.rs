use crate::config::Config;
use crate::domain::ports::{EventRepository, GuestRepository, InvitationRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub guest_repo: Arc<dyn GuestRepository>,
    pub invitation_repo: Arc<dyn InvitationRepository>,
}
