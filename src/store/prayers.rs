use chrono::NaiveDate;

use crate::models::{DailyStats, Prayer, PrayerLog, PrayerName, PrayerStats, Streak, WeeklyGrid};
use crate::stats::prayer::{prayer_completion_rate, prayer_stats, prayer_streak, prayer_streak_summary};

/// Prayer logs, at most one per date, kept sorted by date.
#[derive(Debug, Clone, Default)]
pub struct PrayerBook {
    logs: Vec<PrayerLog>,
}

impl PrayerBook {
    /// Merge logs loaded from storage. Duplicate dates are folded together,
    /// with a prayer counting as done if any copy marks it done.
    pub fn from_logs(logs: Vec<PrayerLog>) -> Self {
        let mut book = Self::default();
        for log in logs {
            match book.index_of(log.date) {
                Ok(idx) => {
                    let existing = &mut book.logs[idx];
                    for (name, done) in log.prayers {
                        let entry = existing.prayers.entry(name).or_insert(false);
                        *entry = *entry || done;
                    }
                }
                Err(idx) => book.logs.insert(idx, log),
            }
        }
        book
    }

    fn index_of(&self, date: NaiveDate) -> std::result::Result<usize, usize> {
        self.logs.binary_search_by_key(&date, |l| l.date)
    }

    pub fn logs(&self) -> &[PrayerLog] {
        &self.logs
    }

    pub fn log_for(&self, date: NaiveDate) -> Option<&PrayerLog> {
        self.index_of(date).ok().map(|idx| &self.logs[idx])
    }

    /// Flip one prayer on `date`, creating that day's log when needed.
    /// Returns whether the prayer is now completed.
    pub fn toggle(&mut self, name: PrayerName, date: NaiveDate) -> bool {
        let idx = match self.index_of(date) {
            Ok(idx) => idx,
            Err(idx) => {
                self.logs.insert(idx, PrayerLog::new(date));
                idx
            }
        };
        self.logs[idx].toggle(name)
    }

    /// All six prayers for `date`, in order.
    pub fn prayers_for(&self, date: NaiveDate) -> Vec<Prayer> {
        let log = self.log_for(date);
        PrayerName::all()
            .into_iter()
            .map(|name| Prayer {
                name,
                completed: log.map(|l| l.is_completed(name)).unwrap_or(false),
            })
            .collect()
    }

    pub fn completion_rate(&self, date: NaiveDate) -> f64 {
        prayer_completion_rate(self.log_for(date))
    }

    pub fn streak(&self, today: NaiveDate) -> u32 {
        prayer_streak(&self.logs, today)
    }

    pub fn streak_summary(&self, today: NaiveDate) -> Streak {
        prayer_streak_summary(&self.logs, today)
    }

    pub fn stats(&self, today: NaiveDate) -> PrayerStats {
        prayer_stats(&self.logs, today)
    }

    /// Per-day obligatory counts for `days`, zero where nothing was logged.
    pub fn grid(&self, days: &[NaiveDate]) -> WeeklyGrid {
        WeeklyGrid::new(
            days.iter()
                .map(|d| {
                    let done = self.log_for(*d).map(|l| l.obligatory_completed()).unwrap_or(0);
                    DailyStats::new(*d, done)
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_date;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn first_toggle_creates_log() {
        let mut book = PrayerBook::default();
        assert!(book.toggle(PrayerName::Maghrib, d("2024-02-01")));
        let log = book.log_for(d("2024-02-01")).unwrap();
        assert!(log.is_completed(PrayerName::Maghrib));
        assert_eq!(log.prayers.len(), 1);

        assert!(!book.toggle(PrayerName::Maghrib, d("2024-02-01")));
        assert_eq!(book.logs().len(), 1);
    }

    #[test]
    fn logs_stay_sorted() {
        let mut book = PrayerBook::default();
        book.toggle(PrayerName::Fajr, d("2024-02-03"));
        book.toggle(PrayerName::Fajr, d("2024-02-01"));
        book.toggle(PrayerName::Fajr, d("2024-02-02"));
        let dates: Vec<_> = book.logs().iter().map(|l| l.date).collect();
        assert_eq!(dates, vec![d("2024-02-01"), d("2024-02-02"), d("2024-02-03")]);
    }

    #[test]
    fn prayers_for_unlogged_day_are_pending() {
        let book = PrayerBook::default();
        let prayers = book.prayers_for(d("2024-02-01"));
        assert_eq!(prayers.len(), 6);
        assert!(prayers.iter().all(|p| !p.completed));
        assert_eq!(book.completion_rate(d("2024-02-01")), 0.0);
    }

    #[test]
    fn streak_from_toggles() {
        let mut book = PrayerBook::default();
        for day in ["2024-02-01", "2024-02-02", "2024-02-03"] {
            for p in [PrayerName::Fajr, PrayerName::Dhuhr, PrayerName::Asr] {
                book.toggle(p, d(day));
            }
        }
        assert_eq!(book.streak(d("2024-02-03")), 3);
        assert_eq!(book.streak_summary(d("2024-02-06")), Streak { current: 0, best: 3 });
        assert!((book.completion_rate(d("2024-02-02")) - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn duplicate_dates_merge_on_load() {
        let mut a = PrayerLog::new(d("2024-02-01"));
        a.toggle(PrayerName::Fajr);
        let mut b = PrayerLog::new(d("2024-02-01"));
        b.toggle(PrayerName::Isha);
        let book = PrayerBook::from_logs(vec![b, a]);
        assert_eq!(book.logs().len(), 1);
        assert_eq!(book.logs()[0].obligatory_completed(), 2);
    }

    #[test]
    fn grid_fills_missing_days() {
        let mut book = PrayerBook::default();
        book.toggle(PrayerName::Fajr, d("2024-02-02"));
        let grid = book.grid(&[d("2024-02-01"), d("2024-02-02")]);
        assert_eq!(grid.days.len(), 2);
        assert_eq!(grid.total_done(), 1);
        assert_eq!(grid.days_with_full_prayers(), 0);
    }
}
