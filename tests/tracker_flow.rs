//! End-to-end tests for the tracker against an on-disk SQLite store.
//!
//! These cover:
//! - Data surviving a close and reopen of the database file
//! - Streaks re-anchored to the day the tracker is opened
//! - Corrupt blobs in the database not blocking startup

use chrono::{NaiveDate, Weekday};
use istiqamah::db::KvStore;
use istiqamah::models::{
    Frequency, HabitCategory, HabitUpdate, LearningKind, NewHabit, NewLearningItem, NewTask,
    PrayerName, TaskUpdate,
};
use istiqamah::store::{HABITS_KEY, PRAYERS_KEY};
use istiqamah::utils::parse_date;
use istiqamah::{Error, FixedClock, SqliteStore, Tracker};
use tempfile::TempDir;

fn d(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn open(dir: &TempDir, today: &str) -> Tracker<SqliteStore> {
    let store = SqliteStore::open(&dir.path().join("data/istiqamah.db")).unwrap();
    Tracker::load(store, FixedClock::on(d(today))).unwrap()
}

#[test]
fn habit_ledger_survives_reopen() {
    let dir = setup_test_dir();
    let mut tracker = open(&dir, "2024-01-03");
    let habit = tracker.add_habit(NewHabit::new("Read Quran", HabitCategory::Spiritual));
    for day in ["2024-01-01", "2024-01-02", "2024-01-03"] {
        assert!(tracker.toggle_habit(habit.id, d(day)).unwrap());
    }
    assert_eq!(tracker.habit(habit.id).unwrap().streak, 3);
    tracker.close();

    let tracker = open(&dir, "2024-01-04");
    let stats = tracker.habit_stats(habit.id).unwrap();
    assert_eq!(stats.total_completions, 3);
    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.longest_streak, 3);
    assert!(tracker.habits_completed_on(d("2024-01-02")).len() == 1);
}

#[test]
fn gap_resets_current_but_not_best() {
    let dir = setup_test_dir();
    let mut tracker = open(&dir, "2024-01-07");
    let habit = tracker.add_habit(NewHabit::new("Walk", HabitCategory::Health));
    for day in ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-06", "2024-01-07"] {
        tracker.toggle_habit(habit.id, d(day)).unwrap();
    }
    let stats = tracker.habit_stats(habit.id).unwrap();
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.longest_streak, 3);

    // Untoggling today drops the current run back to yesterday's.
    assert!(!tracker.toggle_habit(habit.id, d("2024-01-07")).unwrap());
    assert_eq!(tracker.habit(habit.id).unwrap().streak, 1);
}

#[test]
fn prayer_streak_needs_three_obligatory_prayers() {
    let dir = setup_test_dir();
    let mut tracker = open(&dir, "2024-02-03");
    for day in ["2024-02-01", "2024-02-02", "2024-02-03"] {
        for prayer in [PrayerName::Fajr, PrayerName::Dhuhr, PrayerName::Asr] {
            tracker.toggle_prayer(prayer, d(day));
        }
    }
    // Tahajjud is voluntary and never counts toward the threshold.
    tracker.toggle_prayer(PrayerName::Fajr, d("2024-01-31"));
    tracker.toggle_prayer(PrayerName::Tahajjud, d("2024-01-31"));
    tracker.toggle_prayer(PrayerName::Isha, d("2024-01-31"));
    assert_eq!(tracker.prayer_streak(), 3);
    assert_eq!(tracker.prayer_completion_rate(d("2024-02-03")), 60.0);
    tracker.close();

    let tracker = open(&dir, "2024-02-03");
    assert_eq!(tracker.prayer_streak(), 3);
    let prayers = tracker.prayers_for_date(d("2024-01-31"));
    assert_eq!(prayers.len(), 6);
    assert_eq!(prayers.iter().filter(|p| p.completed).count(), 3);
}

#[test]
fn partly_prayed_today_ends_prayer_streak() {
    let dir = setup_test_dir();
    let mut tracker = open(&dir, "2024-02-03");
    for day in ["2024-02-01", "2024-02-02"] {
        for prayer in [PrayerName::Fajr, PrayerName::Dhuhr, PrayerName::Asr] {
            tracker.toggle_prayer(prayer, d(day));
        }
    }
    assert_eq!(tracker.prayer_streak(), 2);

    tracker.toggle_prayer(PrayerName::Fajr, d("2024-02-03"));
    assert_eq!(tracker.prayer_streak(), 0);
    assert_eq!(tracker.prayer_streak_summary().best, 2);

    tracker.toggle_prayer(PrayerName::Dhuhr, d("2024-02-03"));
    tracker.toggle_prayer(PrayerName::Asr, d("2024-02-03"));
    assert_eq!(tracker.prayer_stats().streak, 3);
}

#[test]
fn tasks_and_preferences_round_trip() {
    let dir = setup_test_dir();
    let mut tracker = open(&dir, "2024-03-04");
    let mut weekly = NewTask::new("Jumuah prep");
    weekly.recurring_days = vec![Weekday::Fri];
    let weekly = tracker.add_task(weekly);
    let today = tracker.add_task(NewTask::new("Call family"));
    tracker.toggle_task(today.id).unwrap();
    tracker.set_week_starts_on(Weekday::Mon).unwrap();
    tracker.toggle_dark_mode();
    tracker.close();

    let tracker = open(&dir, "2024-03-08");
    let scheduled: Vec<_> = tracker.tasks_for_date(d("2024-03-08")).iter().map(|t| t.id).collect();
    assert_eq!(scheduled, vec![weekly.id]);
    let stats = tracker.task_stats();
    assert_eq!((stats.completed_tasks, stats.total_tasks), (1, 2));
    assert_eq!(stats.completion_rate, 50.0);
    assert_eq!(tracker.preferences().week_starts_on, Weekday::Mon);
    assert!(tracker.preferences().dark_mode);
}

#[test]
fn unknown_ids_change_nothing() {
    let dir = setup_test_dir();
    let mut tracker = open(&dir, "2024-01-03");
    let habit = tracker.add_habit(NewHabit::new("Read", HabitCategory::Learning));
    let stranger = uuid::Uuid::new_v4();

    assert!(matches!(
        tracker.toggle_habit(stranger, d("2024-01-03")),
        Err(Error::NotFound { .. })
    ));
    assert!(matches!(
        tracker.update_habit(stranger, HabitUpdate::default()),
        Err(Error::NotFound { .. })
    ));
    assert!(matches!(tracker.remove_task(stranger), Err(Error::NotFound { .. })));
    assert_eq!(tracker.habits().len(), 1);
    assert!(tracker.habit(habit.id).unwrap().completed_dates.is_empty());
}

#[test]
fn weekly_habit_due_on_its_days() {
    let dir = setup_test_dir();
    let mut tracker = open(&dir, "2024-01-01");
    let mut new = NewHabit::new("Fast", HabitCategory::Spiritual);
    new.frequency = Frequency::weekly(vec![Weekday::Mon, Weekday::Thu]);
    tracker.add_habit(new);

    assert_eq!(tracker.habits_due_on(d("2024-01-04")).len(), 1);
    assert!(tracker.habits_due_on(d("2024-01-05")).is_empty());
}

#[test]
fn corrupt_rows_do_not_block_startup() {
    let dir = setup_test_dir();
    let path = dir.path().join("data/istiqamah.db");
    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.save(HABITS_KEY, "{ invalid json }}}}").unwrap();
        store.save(PRAYERS_KEY, "[]").unwrap();
    }

    let mut tracker = open(&dir, "2024-01-03");
    assert!(tracker.habits().is_empty());
    tracker.add_habit(NewHabit::new("Read", HabitCategory::Learning));
    let store = tracker.close();

    let blob = store.load(HABITS_KEY).unwrap().unwrap();
    assert!(blob.starts_with('['));
}

#[test]
fn finance_and_learning_survive_reopen() {
    let dir = setup_test_dir();
    let mut tracker = open(&dir, "2024-07-01");
    tracker.set_savings_goal(100_000);
    tracker.add_transaction(30_000);
    tracker.add_transaction(-5_000);
    tracker.set_yearly_investment_goal(360_000);
    tracker.log_investment(10_000);
    let course = tracker.add_learning_item(NewLearningItem::course("Arabic Fundamentals", "Bayyinah", 10));
    tracker.add_learning_item(NewLearningItem::book("Deep Work", "Cal Newport", 280));
    tracker.update_learning_progress(course.id, 3).unwrap();
    tracker.close();

    let tracker = open(&dir, "2024-07-02");
    assert_eq!(tracker.finance().current_savings, 25_000);
    assert_eq!(tracker.finance().savings_percentage(), 25.0);
    assert!(!tracker.investment_on_track());
    let courses = tracker.learning_of_kind(LearningKind::Course);
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].percentage(), 30.0);
    assert_eq!(tracker.library().all().len(), 2);
    assert_eq!(tracker.learning_this_week().len(), 1);
}

#[test]
fn cleared_due_date_survives_reopen() {
    let dir = setup_test_dir();
    let mut tracker = open(&dir, "2024-03-04");
    let mut new = NewTask::new("Renew passport");
    new.due_date = Some(d("2024-03-20"));
    let task = tracker.add_task(new);
    let update = TaskUpdate {
        due_date: Some(None),
        ..TaskUpdate::default()
    };
    tracker.update_task(task.id, update).unwrap();
    tracker.close();

    let tracker = open(&dir, "2024-03-04");
    assert!(tracker.task(task.id).unwrap().due_date.is_none());
    assert_eq!(tracker.tasks_for_date(d("2024-03-04")).len(), 1);
}
