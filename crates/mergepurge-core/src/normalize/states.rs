//! US state abbreviations accepted by the state fallback

/// The 50 states plus DC
pub const STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM",
    "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

/// Uppercased, trimmed abbreviation if it is a known state
pub fn valid_state(raw: &str) -> Option<String> {
    let code = raw.trim().to_uppercase();
    STATES.contains(&code.as_str()).then_some(code)
}

/// Keep a parsed state, or fall back to a raw column value that is a valid
/// abbreviation.
pub fn fall_back_empty_state(parsed: Option<&str>, raw: Option<&str>) -> Option<String> {
    if let Some(state) = parsed.and_then(super::text::non_empty) {
        return Some(state);
    }
    raw.and_then(valid_state)
}
