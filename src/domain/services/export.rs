use crate::domain::models::guest::GuestWithInvitation;
use crate::error::AppError;
use chrono::{DateTime, Utc};

/// Fixed column order and Hebrew labels; spreadsheet tools that organizers
/// use depend on both, so any change here is a breaking one.
const HEADERS: [&str; 16] = [
    "שם בעברית",
    "תעתיק",
    "אימייל",
    "טלפון",
    "סטטוס RSVP",
    "מספר שולחן",
    "מספר מושב",
    "קבוצת יחסים",
    "העדפה תזונתית",
    "הערות תזונה",
    "צרכי נגישות",
    "מלווים מורשים",
    "קישור WhatsApp",
    "הוזמנות נשלחה",
    "הוזמנות נפתחה",
    "תאריך הוספה",
];

fn fmt_time(ts: &Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.to_rfc3339()).unwrap_or_default()
}

fn fmt_num(n: &Option<i32>) -> String {
    n.map(|v| v.to_string()).unwrap_or_default()
}

/// Serialize the guest set to CSV, prefixed with a UTF-8 BOM so Excel
/// renders the Hebrew columns correctly. An empty guest list still yields
/// the header row.
pub fn to_csv(rows: &[GuestWithInvitation]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(HEADERS)
        .map_err(|e| AppError::InternalWithMsg(format!("CSV write error: {e}")))?;

    for row in rows {
        let g = &row.guest;
        let table = fmt_num(&g.table_number);
        let seat = fmt_num(&g.seat_number);
        let plus_ones = g.plus_one_allowance.to_string();
        let sent = fmt_time(&row.sent_at);
        let opened = fmt_time(&row.opened_at);
        let created = g.created_at.to_rfc3339();

        writer
            .write_record([
                g.name_hebrew.as_str(),
                g.name_transliteration.as_deref().unwrap_or_default(),
                g.email.as_deref().unwrap_or_default(),
                g.phone.as_deref().unwrap_or_default(),
                g.rsvp_status.as_str(),
                table.as_str(),
                seat.as_str(),
                g.relationship_group.map(|r| r.as_str()).unwrap_or_default(),
                g.dietary_preference.as_str(),
                g.dietary_notes.as_deref().unwrap_or_default(),
                g.accessibility_needs.as_deref().unwrap_or_default(),
                plus_ones.as_str(),
                row.whatsapp_link.as_deref().unwrap_or_default(),
                sent.as_str(),
                opened.as_str(),
                created.as_str(),
            ])
            .map_err(|e| AppError::InternalWithMsg(format!("CSV write error: {e}")))?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| AppError::InternalWithMsg(format!("CSV flush error: {e}")))?;

    // BOM first, for Excel Hebrew support.
    let mut out = Vec::with_capacity(data.len() + 3);
    out.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
    out.extend_from_slice(&data);
    Ok(out)
}
