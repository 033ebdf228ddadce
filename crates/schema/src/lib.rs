//! Record shapes and payload validation for Daypack.
//!
//! This crate defines the four record collections (tasks, media files,
//! folders, reminders), the subset of fields accepted on create and update,
//! and the validation that normalizes raw payloads before they reach
//! storage. No cross-entity checks happen here.

mod de;
mod error;
mod folder;
mod media;
mod reminder;
mod task;

pub use error::*;
pub use folder::*;
pub use media::*;
pub use reminder::*;
pub use task::*;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses a client-supplied date string into a UTC instant.
///
/// Accepts RFC 3339 (`2024-01-01T10:00:00Z`), a bare datetime as produced by
/// `datetime-local` form inputs (`2024-01-01T10:00`, treated as UTC), or a
/// bare date (midnight UTC).
pub(crate) fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_instant("2024-01-01T10:00:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-01T08:00:00+00:00");
    }

    #[test]
    fn parses_datetime_local_form_value() {
        let parsed = parse_instant("2024-03-05T18:30").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-05T18:30:00+00:00");
    }

    #[test]
    fn parses_bare_date_as_midnight_utc() {
        let parsed = parse_instant("2024-03-05").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-05T00:00:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_instant("not-a-date").is_none());
        assert!(parse_instant("2024-13-40").is_none());
    }
}
