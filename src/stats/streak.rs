//! Streak and rate arithmetic over completion sets.
//!
//! A current streak is anchored: the latest completion on or before `as_of`
//! must be `as_of` itself or the day before, otherwise the streak is broken.
//! Today counts as still open, so an unfinished day never resets a streak
//! that ran through yesterday.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::CompletionSet;

/// Length of the run of consecutive days ending at the latest completion,
/// provided that completion is `as_of` or the day before. Dates after
/// `as_of` are ignored.
pub fn current_streak(dates: &CompletionSet, as_of: NaiveDate) -> u32 {
    let mut walk = dates.iter().rev().skip_while(|d| *d > as_of);

    let Some(mut prev) = walk.next() else {
        return 0;
    };
    if (as_of - prev).num_days() > 1 {
        return 0;
    }

    let mut streak = 1;
    for date in walk {
        if prev.pred_opt() != Some(date) {
            break;
        }
        streak += 1;
        prev = date;
    }
    streak
}

/// Longest run of consecutive days anywhere in the set.
pub fn longest_streak(dates: &CompletionSet) -> u32 {
    let mut best = 0u32;
    let mut current = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for date in dates.iter() {
        current = match prev {
            Some(p) if p.succ_opt() == Some(date) => current + 1,
            _ => 1,
        };
        best = best.max(current);
        prev = Some(date);
    }
    best
}

/// Completions per elapsed day since `since`, in percent. Not clamped: extra
/// completions can push the rate past 100.
pub fn completion_rate(dates: &CompletionSet, since: NaiveDate, as_of: NaiveDate) -> Result<f64> {
    if since > as_of {
        return Err(Error::InvalidRange { since, as_of });
    }
    let elapsed_days = (as_of - since).num_days().max(1);
    Ok(dates.len() as f64 / elapsed_days as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_date;
    use chrono::Duration;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn set(dates: &[&str]) -> CompletionSet {
        dates.iter().map(|s| d(s)).collect()
    }

    #[test]
    fn three_consecutive_days() {
        let dates = set(&["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(current_streak(&dates, d("2024-01-03")), 3);
        assert_eq!(longest_streak(&dates), 3);
    }

    #[test]
    fn gap_isolates_latest_entry() {
        let dates = set(&["2024-01-01", "2024-01-03"]);
        assert_eq!(current_streak(&dates, d("2024-01-03")), 1);
        assert_eq!(longest_streak(&dates), 1);
    }

    #[test]
    fn empty_set_is_zero() {
        let dates = CompletionSet::new();
        assert_eq!(current_streak(&dates, d("2024-01-03")), 0);
        assert_eq!(longest_streak(&dates), 0);
        assert_eq!(completion_rate(&dates, d("2024-01-01"), d("2024-01-03")).unwrap(), 0.0);
        assert_eq!(completion_rate(&dates, d("2024-01-03"), d("2024-01-03")).unwrap(), 0.0);
    }

    #[test]
    fn yesterday_keeps_streak_alive() {
        let dates = set(&["2024-01-01", "2024-01-02"]);
        assert_eq!(current_streak(&dates, d("2024-01-03")), 2);
    }

    #[test]
    fn stale_streak_is_zero() {
        let dates = set(&["2024-01-01", "2024-01-02"]);
        assert_eq!(current_streak(&dates, d("2024-01-04")), 0);
        assert_eq!(longest_streak(&dates), 2);
    }

    #[test]
    fn future_dates_are_ignored() {
        let dates = set(&["2024-01-02", "2024-01-03", "2024-01-09"]);
        assert_eq!(current_streak(&dates, d("2024-01-03")), 2);
    }

    #[test]
    fn crosses_month_and_leap_day() {
        let dates = set(&["2024-02-28", "2024-02-29", "2024-03-01"]);
        assert_eq!(current_streak(&dates, d("2024-03-01")), 3);
        let dates = set(&["2023-12-31", "2024-01-01"]);
        assert_eq!(longest_streak(&dates), 2);
    }

    #[test]
    fn longest_finds_earlier_run() {
        let dates = set(&[
            "2024-01-01",
            "2024-01-02",
            "2024-01-03",
            "2024-01-04",
            "2024-01-10",
            "2024-01-11",
        ]);
        assert_eq!(longest_streak(&dates), 4);
        assert_eq!(current_streak(&dates, d("2024-01-11")), 2);
    }

    #[test]
    fn longest_never_below_current() {
        let pattern = [0, 1, 2, 4, 5, 9, 10, 11, 12, 20];
        let base = d("2024-03-01");
        let dates: CompletionSet = pattern.iter().map(|o| base + Duration::days(*o)).collect();
        let latest = dates.latest().unwrap();
        for extra in 0..5 {
            let as_of = latest + Duration::days(extra);
            assert!(longest_streak(&dates) >= current_streak(&dates, as_of));
        }
    }

    #[test]
    fn rate_over_elapsed_days() {
        let dates = set(&["2024-01-01", "2024-01-03", "2024-01-05", "2024-01-07", "2024-01-09"]);
        let rate = completion_rate(&dates, d("2024-01-01"), d("2024-01-11")).unwrap();
        assert!((rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rate_uses_one_day_minimum_and_is_unclamped() {
        let dates = set(&["2024-01-01", "2024-01-02", "2024-01-03"]);
        let rate = completion_rate(&dates, d("2024-01-03"), d("2024-01-03")).unwrap();
        assert!((rate - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let dates = set(&["2024-01-01"]);
        assert!(matches!(
            completion_rate(&dates, d("2024-01-05"), d("2024-01-01")),
            Err(Error::InvalidRange { .. })
        ));
    }
}
