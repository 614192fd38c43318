use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use crate::{Granularity, ScopeError};

/// Resolve a backend bucket key to the UTC instant it is plotted at.
///
/// - `Day`: `YYYY-MM-DD` → midnight of that date.
/// - `Week`: `YYYY-Www` → midnight of January 1 of `YYYY` plus `(ww - 1) * 7` days.
///   This is not ISO Monday alignment; it mirrors how the dashboard has always
///   placed week buckets. `ww` is 1..=53 and may be written with one or two digits.
/// - `Month`: `YYYY-MM` → midnight of the first day of that month.
///
/// The year is exactly four digits and day/month fields exactly two.
///
/// # Errors
/// Returns `ScopeError::MalformedBucketKey` for any other shape, including
/// out-of-range fields and impossible dates.
pub fn normalize(granularity: Granularity, key: &str) -> Result<DateTime<Utc>, ScopeError> {
    let date = match granularity {
        Granularity::Day => parse_day(key),
        Granularity::Week => parse_week(key),
        Granularity::Month => parse_month(key),
    };
    date.map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .ok_or_else(|| ScopeError::malformed_bucket_key(granularity.as_str(), key))
}

/// Like [`normalize`], returning epoch milliseconds.
///
/// # Errors
/// Returns `ScopeError::MalformedBucketKey` when `key` does not parse.
pub fn normalize_millis(granularity: Granularity, key: &str) -> Result<i64, ScopeError> {
    normalize(granularity, key).map(|t| t.timestamp_millis())
}

fn parse_day(key: &str) -> Option<NaiveDate> {
    let (year, rest) = split_year(key)?;
    let (month, day) = rest.split_once('-')?;
    NaiveDate::from_ymd_opt(year, fixed_digits(month, 2)?, fixed_digits(day, 2)?)
}

fn parse_week(key: &str) -> Option<NaiveDate> {
    let (year, rest) = split_year(key)?;
    let week = rest.strip_prefix('W')?;
    if week.is_empty() || week.len() > 2 {
        return None;
    }
    let week = fixed_digits(week, week.len())?;
    if !(1..=53).contains(&week) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, 1, 1)?.checked_add_days(Days::new(u64::from(week - 1) * 7))
}

fn parse_month(key: &str) -> Option<NaiveDate> {
    let (year, rest) = split_year(key)?;
    NaiveDate::from_ymd_opt(year, fixed_digits(rest, 2)?, 1)
}

// "YYYY-<rest>"
fn split_year(key: &str) -> Option<(i32, &str)> {
    let (year, rest) = key.split_at_checked(4)?;
    let rest = rest.strip_prefix('-')?;
    Some((i32::try_from(fixed_digits(year, 4)?).ok()?, rest))
}

fn fixed_digits(s: &str, width: usize) -> Option<u32> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
