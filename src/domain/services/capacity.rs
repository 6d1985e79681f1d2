use serde::Serialize;

/// Warn once confirmed RSVPs reach 90% of the venue capacity.
const WARNING_THRESHOLD: f64 = 0.90;

#[derive(Debug, Serialize, Clone)]
pub struct CapacityWarning {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
    pub confirmed: i64,
    pub capacity: i32,
    pub percent: i32,
}

/// Derived, never persisted. Callers must pass a freshly counted confirmed
/// total; the ratio is recomputed on every call.
pub fn evaluate(confirmed: i64, venue_capacity: Option<i32>) -> Option<CapacityWarning> {
    let capacity = match venue_capacity {
        Some(c) if c > 0 => c,
        _ => return None,
    };

    let ratio = confirmed as f64 / capacity as f64;
    if ratio < WARNING_THRESHOLD {
        return None;
    }

    let percent = (ratio * 100.0).round() as i32;
    Some(CapacityWarning {
        kind: "capacity_warning",
        message: format!(
            "אזהרה: {confirmed} מתוך {capacity} מקומות מאושרים ({percent}%)"
        ),
        confirmed,
        capacity,
        percent,
    })
}
