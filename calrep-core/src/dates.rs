//! Calendar-day utilities.
//!
//! Everything in the engine works on naive calendar days: events carry no
//! time-of-day and the semester calendars have no timezone concept.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Whether a date is a working weekday (Monday through Friday).
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Iterate every day from `start` to `end`, both inclusive, ascending.
/// Empty when `start > end`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), |d| d.checked_add_days(Days::new(1)))
        .take_while(move |d| *d <= end)
}
