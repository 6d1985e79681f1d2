use crate::domain::services::invitation;
use crate::state::AppState;
use chrono::Utc;
use chrono_tz::Asia::Jerusalem;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};

/// Reminder thresholds in whole days before the event, matching the wording
/// baked into the deep-link message.
const REMINDER_DAYS: [i64; 2] = [7, 2];

pub async fn start_reminder_worker(state: Arc<AppState>) {
    info!("Starting RSVP reminder worker...");

    loop {
        if let Err(e) = run_reminder_pass(&state).await {
            error!("Reminder pass failed: {:?}", e);
        }
        sleep(Duration::from_secs(3600)).await;
    }
}

/// One reminder sweep: refresh the wa.me deep-link of every pending guest
/// whose event is exactly 7 or 2 days away. Tokens are never rotated; only
/// the stored link changes, so previously shared RSVP URLs keep working.
pub async fn run_reminder_pass(state: &Arc<AppState>) -> Result<(), crate::error::AppError> {
    let now = Utc::now();
    let pending = state.guest_repo.find_pending_reminders(now).await?;

    if pending.is_empty() {
        return Ok(());
    }

    // Day arithmetic happens in event-local time; a UTC date boundary is not
    // a Jerusalem date boundary.
    let today = now.with_timezone(&Jerusalem).date_naive();
    let mut updated = 0usize;

    for reminder in pending {
        let event_day = reminder.event_date.with_timezone(&Jerusalem).date_naive();
        let days_until = (event_day - today).num_days();
        if !REMINDER_DAYS.contains(&days_until) {
            continue;
        }

        let Some(phone) = reminder.phone.as_deref() else {
            continue;
        };

        let rsvp_url = invitation::rsvp_url(&state.config.app_base_url, &reminder.token);
        let link = invitation::build_reminder_link(phone, &reminder.title, &rsvp_url, days_until);

        match state.invitation_repo.update_link(&reminder.token, &link).await {
            Ok(()) => updated += 1,
            Err(e) => {
                error!(
                    "Failed to refresh reminder link for guest {}: {:?}",
                    reminder.guest_id, e
                );
            }
        }
    }

    if updated > 0 {
        info!("Refreshed {} pending reminder links", updated);
    }
    Ok(())
}
