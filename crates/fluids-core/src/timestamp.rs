//! Timestamps written into the `consumed at` column.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Timezone the log is kept in.
pub const LOG_TZ: Tz = chrono_tz::America::Denver;

/// TZID used for the calendar feed; matches [`LOG_TZ`].
pub const LOG_TZID: &str = "America/Denver";

/// e.g. `"Tue Jan  9 2024  3:45 PM"`. Day and hour are space padded.
const TIMESTAMP_FORMAT: &str = "%a %b %e %Y %l:%M %p";

/// Format an instant as local log time.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&LOG_TZ)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// The current time as local log time.
pub fn now() -> String {
    format_timestamp(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::parse_consumed_at;
    use chrono::TimeZone;

    #[test]
    fn test_format_winter() {
        let at = Utc.with_ymd_and_hms(2024, 1, 9, 22, 45, 0).unwrap();
        assert_eq!(format_timestamp(at), "Tue Jan  9 2024  3:45 PM");
    }

    #[test]
    fn test_format_summer_uses_daylight_offset() {
        // MDT is UTC-6
        let at = Utc.with_ymd_and_hms(2024, 7, 15, 16, 5, 0).unwrap();
        assert_eq!(format_timestamp(at), "Mon Jul 15 2024 10:05 AM");
    }

    #[test]
    fn test_written_timestamp_parses_back() {
        let at = Utc.with_ymd_and_hms(2024, 11, 3, 6, 30, 0).unwrap();
        let written = format_timestamp(at);
        let parsed = parse_consumed_at(&written).unwrap();

        assert_eq!(parsed, at.with_timezone(&LOG_TZ).naive_local());
    }
}
