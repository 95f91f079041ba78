use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::prayer::OBLIGATORY_PER_DAY;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitStats {
    pub total_completions: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PrayerStats {
    pub total_prayers: u32,
    pub completed_prayers: u32,
    pub streak: u32,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub completion_rate: f64,
}

/// Obligatory prayers completed on one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub prayers_done: u8,
    pub prayers_total: u8,
}

impl DailyStats {
    pub fn new(date: NaiveDate, prayers_done: u8) -> Self {
        Self {
            date,
            prayers_done,
            prayers_total: OBLIGATORY_PER_DAY,
        }
    }

    pub fn completion_ratio(&self) -> f64 {
        if self.prayers_total == 0 {
            0.0
        } else {
            self.prayers_done as f64 / self.prayers_total as f64
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyGrid {
    pub days: Vec<DailyStats>,
}

impl WeeklyGrid {
    pub fn new(days: Vec<DailyStats>) -> Self {
        Self { days }
    }

    pub fn total_done(&self) -> u32 {
        self.days.iter().map(|d| d.prayers_done as u32).sum()
    }

    pub fn days_with_full_prayers(&self) -> u32 {
        self.days
            .iter()
            .filter(|d| d.prayers_done >= d.prayers_total)
            .count() as u32
    }
}
