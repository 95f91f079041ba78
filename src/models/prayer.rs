use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::Error;

/// Number of obligatory prayers in a day.
pub const OBLIGATORY_PER_DAY: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PrayerName {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    /// Optional night prayer; never counted towards rates or streaks.
    Tahajjud,
}

impl PrayerName {
    pub fn all() -> [PrayerName; 6] {
        [
            PrayerName::Fajr,
            PrayerName::Dhuhr,
            PrayerName::Asr,
            PrayerName::Maghrib,
            PrayerName::Isha,
            PrayerName::Tahajjud,
        ]
    }

    pub fn is_obligatory(&self) -> bool {
        !matches!(self, PrayerName::Tahajjud)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "fajr",
            PrayerName::Dhuhr => "dhuhr",
            PrayerName::Asr => "asr",
            PrayerName::Maghrib => "maghrib",
            PrayerName::Isha => "isha",
            PrayerName::Tahajjud => "tahajjud",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "Fajr",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
            PrayerName::Tahajjud => "Tahajjud",
        }
    }
}

impl std::fmt::Display for PrayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PrayerName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fajr" => Ok(PrayerName::Fajr),
            "dhuhr" | "zuhr" | "dhuhur" => Ok(PrayerName::Dhuhr),
            "asr" => Ok(PrayerName::Asr),
            "maghrib" => Ok(PrayerName::Maghrib),
            "isha" => Ok(PrayerName::Isha),
            "tahajjud" => Ok(PrayerName::Tahajjud),
            _ => Err(Error::unknown("prayer", s)),
        }
    }
}

/// One day's prayer record. Prayers never toggled that day are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerLog {
    pub date: NaiveDate,
    #[serde(default)]
    pub prayers: BTreeMap<PrayerName, bool>,
}

impl PrayerLog {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            prayers: BTreeMap::new(),
        }
    }

    pub fn is_completed(&self, name: PrayerName) -> bool {
        self.prayers.get(&name).copied().unwrap_or(false)
    }

    /// Flip one prayer. Returns whether it is now completed.
    pub fn toggle(&mut self, name: PrayerName) -> bool {
        let done = !self.is_completed(name);
        self.prayers.insert(name, done);
        done
    }

    pub fn obligatory_completed(&self) -> u8 {
        self.prayers
            .iter()
            .filter(|(name, done)| **done && name.is_obligatory())
            .count() as u8
    }
}

/// A prayer and whether it was completed on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prayer {
    pub name: PrayerName,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_alternate_spellings() {
        assert_eq!("Zuhr".parse::<PrayerName>().unwrap(), PrayerName::Dhuhr);
        assert_eq!("FAJR".parse::<PrayerName>().unwrap(), PrayerName::Fajr);
        assert!(matches!(
            "witr".parse::<PrayerName>(),
            Err(Error::UnknownVariant { .. })
        ));
    }

    #[test]
    fn tahajjud_is_not_counted() {
        let mut log = PrayerLog::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        log.toggle(PrayerName::Fajr);
        log.toggle(PrayerName::Tahajjud);
        log.toggle(PrayerName::Isha);
        log.toggle(PrayerName::Isha);
        assert_eq!(log.obligatory_completed(), 1);
        assert!(log.is_completed(PrayerName::Tahajjud));
        assert!(!log.is_completed(PrayerName::Isha));
    }

    #[test]
    fn log_serializes_with_prayer_keys() {
        let mut log = PrayerLog::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        log.toggle(PrayerName::Asr);
        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(json, r#"{"date":"2024-02-01","prayers":{"Asr":true}}"#);
    }
}
