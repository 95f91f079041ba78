use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn default_reminder_time() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN)
}
fn default_week_start() -> Weekday {
    Weekday::Sun
}
fn default_true() -> bool {
    true
}

/// User preferences persisted alongside the tracked data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub reminder_enabled: bool,
    #[serde(default = "default_reminder_time", with = "hhmm")]
    pub reminder_time: NaiveTime,
    #[serde(default = "default_week_start")]
    pub week_starts_on: Weekday,
    #[serde(default = "default_true")]
    pub show_completed_habits: bool,
    #[serde(default)]
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            reminder_enabled: false,
            reminder_time: default_reminder_time(),
            week_starts_on: default_week_start(),
            show_completed_habits: true,
            dark_mode: false,
        }
    }
}

impl Preferences {
    pub fn toggle_reminder(&mut self) -> bool {
        self.reminder_enabled = !self.reminder_enabled;
        self.reminder_enabled
    }

    /// Accepts `HH:MM` in 24-hour form.
    pub fn set_reminder_time(&mut self, time: &str) -> Result<()> {
        self.reminder_time = parse_hhmm(time)?;
        Ok(())
    }

    pub fn set_week_starts_on(&mut self, day: Weekday) -> Result<()> {
        if !matches!(day, Weekday::Sun | Weekday::Mon) {
            return Err(Error::InvalidWeekStart(day));
        }
        self.week_starts_on = day;
        Ok(())
    }

    pub fn toggle_show_completed_habits(&mut self) -> bool {
        self.show_completed_habits = !self.show_completed_habits;
        self.show_completed_habits
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }
}

pub fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    if s.len() != 5 {
        return Err(Error::InvalidTime(s.to_string()));
    }
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| Error::InvalidTime(s.to_string()))
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_hhmm(&s).map_err(serde::de::Error::custom)
    }
}
