//! Anchor-text field extraction primitives.
//!
//! The statement layout is parsed through small labelled-field patterns: an
//! anchor string followed by a token matching a value grammar. Keeping this
//! as one primitive avoids a one-off regex per field.

use regex::Regex;

/// Value grammar for a `DD/MM/YY` or `DD/MM/YYYY` date token.
pub const DATE_TOKEN: &str = r"[0-9]{2}/[0-9]{2}/[0-9]{2,4}";
/// Value grammar for a short `DD/MM/YY` date token.
pub const SHORT_DATE_TOKEN: &str = r"\d{2}/\d{2}/\d{2}";
/// Value grammar for a comma-grouped decimal amount.
pub const GROUPED_AMOUNT: &str = r"[\d,]+\.\d{2}";
/// Value grammar for a plain decimal amount.
pub const PLAIN_AMOUNT: &str = r"\d+\.\d+";

/// First token matching `value` that follows `anchor` (case-insensitively),
/// allowing `:`/`-`/whitespace between label and value.
pub fn labeled_value(text: &str, anchor: &str, value: &str) -> Option<String> {
    let pattern = format!(r"(?i){}\s*[:\-\s]*({})", regex::escape(anchor), value);
    let re = Regex::new(&pattern).unwrap();
    re.captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// First token matching `value` that immediately precedes a token matching
/// `following`. Layout-dependent; callers treat the result as heuristic.
pub fn value_before(text: &str, value: &str, following: &str) -> Option<String> {
    let pattern = format!(r"({})\s+{}", value, following);
    let re = Regex::new(&pattern).unwrap();
    re.captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// Case-insensitive containment of `marker` in `text`.
pub fn contains_marker(text: &str, marker: &str) -> bool {
    text.to_lowercase().contains(&marker.to_lowercase())
}

/// Parse a possibly comma-grouped decimal token.
pub fn parse_amount(token: &str) -> Option<f64> {
    token.replace(',', "").parse().ok()
}
