//! Business-hours gate.
//!
//! Evaluated once at call entry to choose between the main menu and the
//! after-hours flow. Office hours are Monday through Friday, 7:00 AM to
//! 5:00 PM Eastern; there is no holiday calendar.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::America::New_York;

const OPEN_HOUR: f64 = 7.0;
const CLOSE_HOUR: f64 = 17.0;

/// Whether the office is open at the given instant.
///
/// Open iff the Eastern-local weekday is Mon-Fri and the fractional hour
/// (hour + minute/60) lies in [7.0, 17.0) — open bound inclusive, close
/// bound exclusive.
pub fn is_open(now: DateTime<Utc>) -> bool {
    let local = now.with_timezone(&New_York);

    if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }

    let hour = local.hour() as f64 + local.minute() as f64 / 60.0;
    (OPEN_HOUR..CLOSE_HOUR).contains(&hour)
}
