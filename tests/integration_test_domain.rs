use guestlist_backend::domain::models::enums::EventStatus;
use guestlist_backend::domain::models::invitation::generate_rsvp_token;
use guestlist_backend::domain::services::{export, invitation, phone};
use std::collections::HashSet;

#[test]
fn test_phone_normalization() {
    assert_eq!(phone::normalize("052-1234567"), Some("+972521234567".into()));
    assert_eq!(phone::normalize("0521234567"), Some("+972521234567".into()));
    assert_eq!(phone::normalize("+972521234567"), Some("+972521234567".into()));
    assert_eq!(phone::normalize("972521234567"), Some("+972521234567".into()));
    assert_eq!(phone::normalize("(052) 123 4567"), Some("+972521234567".into()));
    // Non-Israeli numbers pass through with a plus.
    assert_eq!(phone::normalize("14155551234"), Some("+14155551234".into()));
    assert_eq!(phone::normalize(""), None);
    assert_eq!(phone::normalize("abc"), None);
}

#[test]
fn test_rsvp_tokens_are_unique_and_fixed_width() {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        let token = generate_rsvp_token();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(seen.insert(token), "token collision");
    }
}

#[test]
fn test_whatsapp_invite_link() {
    let url = invitation::rsvp_url("http://localhost:3000", "abc123");
    assert_eq!(url, "http://localhost:3000/rsvp/abc123");

    let link = invitation::build_whatsapp_link("+972521234567", "חתונה של דנה", &url);
    assert!(link.starts_with("https://wa.me/972521234567?text="));
    assert!(link.contains(&urlencoding::encode("הוזמנת לאירוע").into_owned()));
    assert!(link.contains("abc123"));
}

#[test]
fn test_reminder_link_wording_by_urgency() {
    let url = "http://localhost:3000/rsvp/abc123";

    let week = invitation::build_reminder_link("+972521234567", "חתונה", url, 7);
    assert!(week.contains(&urlencoding::encode("עוד שבוע").into_owned()));

    let soon = invitation::build_reminder_link("+972521234567", "חתונה", url, 2);
    assert!(soon.contains(&urlencoding::encode("עוד 2 ימים").into_owned()));

    let last_day = invitation::build_reminder_link("+972521234567", "חתונה", url, 1);
    assert!(last_day.contains(&urlencoding::encode("עוד 2 ימים").into_owned()));
}

#[test]
fn test_export_of_empty_guest_list_is_header_only() {
    let bytes = export::to_csv(&[]).unwrap();
    assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);

    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    assert!(header.contains("שם בעברית"));
    assert!(header.contains("תאריך הוספה"));
    assert_eq!(header.split(',').count(), 16);
    assert_eq!(lines.next(), None);
}

#[test]
fn test_event_status_graph() {
    use EventStatus::*;

    assert!(Draft.can_transition_to(Published));
    assert!(Draft.can_transition_to(Cancelled));
    assert!(Published.can_transition_to(Cancelled));
    assert!(Published.can_transition_to(Completed));

    assert!(!Draft.can_transition_to(Completed));
    assert!(!Published.can_transition_to(Draft));
    assert!(!Completed.can_transition_to(Published));
    assert!(!Cancelled.can_transition_to(Draft));
    assert!(!Cancelled.can_transition_to(Published));
}
