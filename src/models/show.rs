use diesel::prelude::*;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use jiff_diesel::Timestamp as DbTimestamp;

/// Format accepted for a show's start time on input (interpreted as UTC).
pub const START_TIME_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format used when a start time is rendered back to clients.
pub const START_TIME_DISPLAY_FORMAT: &str = "%m/%d/%Y, %H:%M:%S";

/// Show row linking one venue and one artist at a start time.
#[derive(Debug, Queryable, Selectable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::shows)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Show {
    pub id: i32,
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: DbTimestamp,
}

impl Show {
    pub fn starts_at(&self) -> jiff::Timestamp {
        jiff::Timestamp::from(self.start_time)
    }
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::shows)]
pub struct NewShow {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: DbTimestamp,
}

/// Whether a show lies before or after a reference instant.
///
/// Never stored: a show becomes past as soon as the clock passes its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTiming {
    Past,
    Upcoming,
}

impl ShowTiming {
    /// A show is upcoming only when it starts strictly after `now`.
    pub fn classify(start: jiff::Timestamp, now: jiff::Timestamp) -> Self {
        if start > now {
            ShowTiming::Upcoming
        } else {
            ShowTiming::Past
        }
    }
}

/// Parses a start time in [`START_TIME_INPUT_FORMAT`], falling back to ISO 8601.
pub fn parse_start_time(raw: &str) -> Option<jiff::Timestamp> {
    let raw = raw.trim();
    let civil = DateTime::strptime(START_TIME_INPUT_FORMAT, raw)
        .or_else(|_| raw.parse::<DateTime>())
        .ok()?;
    civil
        .to_zoned(TimeZone::UTC)
        .ok()
        .map(|zoned| zoned.timestamp())
}

pub fn display_start_time(start: jiff::Timestamp) -> String {
    start.strftime(START_TIME_DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(raw: &str) -> jiff::Timestamp {
        raw.parse().unwrap()
    }

    #[test]
    fn test_classify_is_strictly_after_now() {
        let now = ts("2025-03-01T12:00:00Z");
        assert_eq!(
            ShowTiming::classify(ts("2025-03-01T12:00:01Z"), now),
            ShowTiming::Upcoming
        );
        assert_eq!(ShowTiming::classify(now, now), ShowTiming::Past);
        assert_eq!(
            ShowTiming::classify(ts("2024-12-31T23:59:59Z"), now),
            ShowTiming::Past
        );
    }

    #[test]
    fn test_parse_start_time_form_format() {
        let parsed = parse_start_time("2035-04-01 20:00:00").unwrap();
        assert_eq!(parsed, ts("2035-04-01T20:00:00Z"));
    }

    #[test]
    fn test_parse_start_time_iso_fallback() {
        let parsed = parse_start_time("2035-04-01T20:00:00").unwrap();
        assert_eq!(parsed, ts("2035-04-01T20:00:00Z"));
    }

    #[test]
    fn test_parse_start_time_rejects_garbage() {
        assert!(parse_start_time("next tuesday").is_none());
        assert!(parse_start_time("").is_none());
    }

    #[test]
    fn test_display_start_time() {
        let rendered = display_start_time(ts("2035-04-01T20:05:09Z"));
        assert_eq!(rendered, "04/01/2035, 20:05:09");
    }
}
