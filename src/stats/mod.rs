pub mod prayer;
pub mod streak;

pub use prayer::{prayer_completion_rate, prayer_stats, prayer_streak, STREAK_THRESHOLD};
pub use streak::{completion_rate, current_streak, longest_streak};

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Habit, HabitStats, Task, TaskStats};

/// Recompute a habit's statistics from its ledger. The rate is measured from
/// the day the habit was created, or from `as_of` if the clock reads earlier.
pub fn habit_stats(habit: &Habit, as_of: NaiveDate) -> Result<HabitStats> {
    let dates = &habit.completed_dates;
    let since = habit.created_on().min(as_of);
    Ok(HabitStats {
        total_completions: dates.len() as u32,
        current_streak: current_streak(dates, as_of),
        longest_streak: longest_streak(dates),
        completion_rate: completion_rate(dates, since, as_of)?,
    })
}

pub fn task_stats(tasks: &[Task]) -> TaskStats {
    let total_tasks = tasks.len() as u32;
    let completed_tasks = tasks.iter().filter(|t| t.completed).count() as u32;
    let completion_rate = if total_tasks > 0 {
        completed_tasks as f64 / total_tasks as f64 * 100.0
    } else {
        0.0
    };
    TaskStats {
        total_tasks,
        completed_tasks,
        completion_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HabitCategory, NewHabit};
    use crate::store::HabitBook;
    use crate::utils::parse_date;

    #[test]
    fn clock_behind_creation_still_yields_stats() {
        let mut book = HabitBook::default();
        let created = parse_date("2024-03-10").unwrap().and_hms_opt(23, 30, 0).unwrap();
        let id = book.add(NewHabit::new("Walk", HabitCategory::Health), created).id;
        let habit = book.get(id).unwrap();

        let stats = habit_stats(habit, parse_date("2024-03-09").unwrap()).unwrap();
        assert_eq!(stats.total_completions, 0);
        assert_eq!(stats.completion_rate, 0.0);
    }

    #[test]
    fn task_rate_is_zero_without_tasks() {
        assert_eq!(task_stats(&[]), TaskStats::default());
    }
}
