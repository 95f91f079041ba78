use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use crate::error::{Error, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    // chrono accepts unpadded fields; the stored format does not
    let well_formed = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(Error::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| Error::InvalidDate(s.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// First day of the week containing `date`.
pub fn week_start(date: NaiveDate, starts_on: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_sunday() + 7 - starts_on.num_days_from_sunday()) % 7;
    date - Duration::days(offset as i64)
}

/// The seven days of the week containing `date`.
pub fn week_of(date: NaiveDate, starts_on: Weekday) -> Vec<NaiveDate> {
    let first = week_start(date, starts_on);
    (0..7).map(|i| first + Duration::days(i)).collect()
}

pub fn is_same_week(date: NaiveDate, today: NaiveDate, starts_on: Weekday) -> bool {
    week_start(date, starts_on) == week_start(today, starts_on)
}

/// Whole days from `today` until `target`, never negative.
pub fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days().max(0)
}

/// Share of the `start..end` window that has elapsed at `now`, in whole percent.
pub fn progress_percentage(start: NaiveDateTime, end: NaiveDateTime, now: NaiveDateTime) -> u8 {
    if now >= end {
        return 100;
    }
    if now <= start {
        return 0;
    }
    let total = (end - start).num_seconds() as f64;
    let elapsed = (now - start).num_seconds() as f64;
    (elapsed / total * 100.0).round() as u8
}
