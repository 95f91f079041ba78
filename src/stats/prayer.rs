//! Prayer-specific rates and streaks.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::models::{CompletionSet, PrayerLog, PrayerStats, Streak, OBLIGATORY_PER_DAY};
use crate::stats::streak::longest_streak;

/// Obligatory prayers a day needs to count towards a streak.
pub const STREAK_THRESHOLD: u8 = 3;

/// Share of the five obligatory prayers completed in `log`, in percent.
pub fn prayer_completion_rate(log: Option<&PrayerLog>) -> f64 {
    let done = log.map(PrayerLog::obligatory_completed).unwrap_or(0);
    done as f64 / OBLIGATORY_PER_DAY as f64 * 100.0
}

/// Days whose log reaches the streak threshold.
pub fn qualifying_days<'a, I>(logs: I) -> CompletionSet
where
    I: IntoIterator<Item = &'a PrayerLog>,
{
    logs.into_iter()
        .filter(|log| log.obligatory_completed() >= STREAK_THRESHOLD)
        .map(|log| log.date)
        .collect()
}

/// Days in a row, walking back from the newest log on or before `as_of`,
/// that reach the threshold. The newest log must be from `as_of` or the day
/// before, and the walk stops at the first day with no log or too few prayers.
pub fn prayer_streak(logs: &[PrayerLog], as_of: NaiveDate) -> u32 {
    let by_date: BTreeMap<NaiveDate, &PrayerLog> = logs
        .iter()
        .filter(|log| log.date <= as_of)
        .map(|log| (log.date, log))
        .collect();
    let Some(&latest) = by_date.keys().next_back() else {
        return 0;
    };
    if as_of - latest > Duration::days(1) {
        return 0;
    }

    let mut streak = 0;
    let mut day = latest;
    while let Some(log) = by_date.get(&day) {
        if log.obligatory_completed() < STREAK_THRESHOLD {
            break;
        }
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

pub fn prayer_streak_summary(logs: &[PrayerLog], as_of: NaiveDate) -> Streak {
    Streak {
        current: prayer_streak(logs, as_of),
        best: longest_streak(&qualifying_days(logs)),
    }
}

pub fn prayer_stats(logs: &[PrayerLog], as_of: NaiveDate) -> PrayerStats {
    let total_prayers = logs.len() as u32 * OBLIGATORY_PER_DAY as u32;
    let completed_prayers: u32 = logs.iter().map(|l| l.obligatory_completed() as u32).sum();
    let completion_rate = if total_prayers > 0 {
        completed_prayers as f64 / total_prayers as f64 * 100.0
    } else {
        0.0
    };

    PrayerStats {
        total_prayers,
        completed_prayers,
        streak: prayer_streak(logs, as_of),
        completion_rate,
    }
}
