use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};

/// Month names used as keys by the aggregate backend, in calendar order.
///
/// This is a fixed table rather than a formatter so the keys never depend on
/// the locale of the running process.
pub const MONTH_NAMES: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

/// Wall-clock format the history backend expects for date bounds.
pub const BACKEND_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:00";

/// Proleptic Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => return None,
    };
    Some(days)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    days_in_month(date.year(), date.month())
        .and_then(|last| date.with_day(last))
        .unwrap_or(date)
}

/// 00:00:00.000 of the given day.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::default())
}

/// 23:59:59.999 of the given day.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or_default();
    date.and_time(last)
}

/// First and last instant (wall time) of the calendar month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    (start_of_day(month_start(date)), end_of_day(month_end(date)))
}

/// Attach the offset of `tz` at that moment to a wall-clock time.
///
/// Ambiguous times resolve to the earlier instant. Times skipped by a DST
/// transition have no representation in `tz` and are read as UTC.
pub fn localize<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<FixedOffset> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive).fixed_offset())
}

pub fn to_local_instant(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    localize(&Local, naive)
}

/// Format an instant for the history backend: wall time in the instant's own
/// offset, seconds zeroed, offset dropped.
pub fn format_backend_datetime(instant: &DateTime<FixedOffset>) -> String {
    instant
        .naive_local()
        .format(BACKEND_DATETIME_FORMAT)
        .to_string()
}
