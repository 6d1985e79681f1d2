/// wa.me deep-link construction for the WhatsApp RSVP channel. The organizer
/// opens these links manually; nothing is auto-sent.

pub fn rsvp_url(base_url: &str, token: &str) -> String {
    format!("{base_url}/rsvp/{token}")
}

/// Invitation deep-link. `None` when the guest has no phone.
pub fn build_whatsapp_link(phone: &str, event_title: &str, rsvp_url: &str) -> String {
    let digits = phone.trim_start_matches('+');
    let message = format!("הוזמנת לאירוע \"{event_title}\". לאישור הגעה: {rsvp_url}");
    format!("https://wa.me/{digits}?text={}", urlencoding::encode(&message))
}

/// Reminder deep-link with urgency wording; the token (and thus the URL the
/// guest lands on) stays the same.
pub fn build_reminder_link(
    phone: &str,
    event_title: &str,
    rsvp_url: &str,
    days_until_event: i64,
) -> String {
    let digits = phone.trim_start_matches('+');
    let urgency = if days_until_event <= 2 { "עוד 2 ימים" } else { "עוד שבוע" };
    let message =
        format!("תזכורת: {urgency} לאירוע \"{event_title}\". אנא אשר/י הגעה: {rsvp_url}");
    format!("https://wa.me/{digits}?text={}", urlencoding::encode(&message))
}
