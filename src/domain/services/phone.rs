/// Normalize an Israeli phone number to E.164: `05X-XXXXXXX` or
/// `05XXXXXXXXX` becomes `+972XXXXXXXXX`. Digit-count correctness is
/// deliberately not validated; malformed numbers pass through structurally
/// normalized.
pub fn normalize(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    if digits.starts_with("972") {
        Some(format!("+{digits}"))
    } else if let Some(rest) = digits.strip_prefix('0') {
        Some(format!("+972{rest}"))
    } else {
        Some(format!("+{digits}"))
    }
}

pub fn normalize_opt(raw: Option<&str>) -> Option<String> {
    raw.and_then(normalize)
}
