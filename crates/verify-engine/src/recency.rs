//! Statement-date recency and identity-field presence.

use chrono::{Months, NaiveDate};

/// Parse a statement date token, short year form first.
pub fn parse_statement_date(token: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(token, "%d/%m/%y")
        .or_else(|_| NaiveDate::parse_from_str(token, "%d/%m/%Y"))
        .ok()
}

/// Whether `date` falls inside the trailing window of `months` calendar
/// months ending at `today`. The window boundary itself is inside.
pub fn within_trailing_months(date: NaiveDate, today: NaiveDate, months: u32) -> bool {
    match today.checked_sub_months(Months::new(months)) {
        Some(cutoff) => date >= cutoff && date <= today,
        None => false,
    }
}

/// Case-insensitive presence of a claimed identity field in the statement
/// text. An empty claim never matches.
pub fn is_present(text: &str, claimed: &str) -> bool {
    let claimed = claimed.trim();
    if claimed.is_empty() {
        return false;
    }
    text.to_lowercase().contains(&claimed.to_lowercase())
}
