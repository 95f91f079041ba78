use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;
use crate::models::CompletionSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitCategory {
    Spiritual,
    Health,
    Learning,
    Finance,
    Productivity,
    Other,
}

impl HabitCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitCategory::Spiritual => "spiritual",
            HabitCategory::Health => "health",
            HabitCategory::Learning => "learning",
            HabitCategory::Finance => "finance",
            HabitCategory::Productivity => "productivity",
            HabitCategory::Other => "other",
        }
    }
}

impl FromStr for HabitCategory {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spiritual" => Ok(HabitCategory::Spiritual),
            "health" => Ok(HabitCategory::Health),
            "learning" => Ok(HabitCategory::Learning),
            "finance" => Ok(HabitCategory::Finance),
            "productivity" => Ok(HabitCategory::Productivity),
            "other" => Ok(HabitCategory::Other),
            _ => Err(Error::unknown("habit category", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyKind {
    Daily,
    Weekly,
    Monthly,
}

impl FrequencyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyKind::Daily => "daily",
            FrequencyKind::Weekly => "weekly",
            FrequencyKind::Monthly => "monthly",
        }
    }
}

impl FromStr for FrequencyKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(FrequencyKind::Daily),
            "weekly" => Ok(FrequencyKind::Weekly),
            "monthly" => Ok(FrequencyKind::Monthly),
            _ => Err(Error::unknown("frequency", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    pub kind: FrequencyKind,
    /// Weekdays a weekly habit is due on. Empty means every day.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days: Vec<Weekday>,
}

impl Frequency {
    pub fn daily() -> Self {
        Self {
            kind: FrequencyKind::Daily,
            days: Vec::new(),
        }
    }

    pub fn weekly(days: Vec<Weekday>) -> Self {
        Self {
            kind: FrequencyKind::Weekly,
            days,
        }
    }

    pub fn monthly() -> Self {
        Self {
            kind: FrequencyKind::Monthly,
            days: Vec::new(),
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::daily()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub icon: String,
    pub color: String,
    pub category: HabitCategory,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub goal: Option<u32>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub completed_dates: CompletionSet,
    /// Current streak as of the last mutation. Derived from `completed_dates`.
    #[serde(default)]
    pub streak: u32,
}

impl Habit {
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date()
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(date)
    }

    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        let created = self.created_on();
        if date < created {
            return false;
        }
        match self.frequency.kind {
            FrequencyKind::Daily => true,
            FrequencyKind::Weekly => {
                self.frequency.days.is_empty() || self.frequency.days.contains(&date.weekday())
            }
            FrequencyKind::Monthly => {
                date.day() == created.day().min(days_in_month(date.year(), date.month()))
            }
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Caller-supplied fields of a habit; id, timestamps and ledger are assigned on add.
#[derive(Debug, Clone)]
pub struct NewHabit {
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub color: String,
    pub category: HabitCategory,
    pub frequency: Frequency,
    pub goal: Option<u32>,
}

impl NewHabit {
    pub fn new(name: impl Into<String>, category: HabitCategory) -> Self {
        Self {
            name: name.into(),
            description: None,
            icon: "check".to_string(),
            color: "#5c945c".to_string(),
            category,
            frequency: Frequency::daily(),
            goal: None,
        }
    }
}

/// Partial update; `None` fields are left untouched. `Some(None)` clears an
/// optional field.
#[derive(Debug, Clone, Default)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub category: Option<HabitCategory>,
    pub frequency: Option<Frequency>,
    pub goal: Option<Option<u32>>,
    pub completed_dates: Option<CompletionSet>,
}

impl HabitUpdate {
    pub(crate) fn apply(self, habit: &mut Habit) {
        if let Some(name) = self.name {
            habit.name = name;
        }
        if let Some(description) = self.description {
            habit.description = description;
        }
        if let Some(icon) = self.icon {
            habit.icon = icon;
        }
        if let Some(color) = self.color {
            habit.color = color;
        }
        if let Some(category) = self.category {
            habit.category = category;
        }
        if let Some(frequency) = self.frequency {
            habit.frequency = frequency;
        }
        if let Some(goal) = self.goal {
            habit.goal = goal;
        }
        if let Some(dates) = self.completed_dates {
            habit.completed_dates = dates;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_date;

    fn habit_created(date: &str, frequency: Frequency) -> Habit {
        Habit {
            id: Uuid::new_v4(),
            name: "Read".into(),
            description: None,
            icon: "book".into(),
            color: "#fff".into(),
            category: HabitCategory::Learning,
            frequency,
            goal: None,
            created_at: parse_date(date).unwrap().and_hms_opt(8, 0, 0).unwrap(),
            completed_dates: CompletionSet::new(),
            streak: 0,
        }
    }

    #[test]
    fn weekly_mask_selects_weekdays() {
        let habit = habit_created("2024-01-01", Frequency::weekly(vec![Weekday::Mon, Weekday::Fri]));
        assert!(habit.is_due_on(parse_date("2024-01-05").unwrap()));
        assert!(!habit.is_due_on(parse_date("2024-01-03").unwrap()));
        assert!(habit.is_due_on(parse_date("2024-01-08").unwrap()));
    }

    #[test]
    fn nothing_is_due_before_creation() {
        let habit = habit_created("2024-01-10", Frequency::daily());
        assert!(!habit.is_due_on(parse_date("2024-01-09").unwrap()));
        assert!(habit.is_due_on(parse_date("2024-01-10").unwrap()));
    }

    #[test]
    fn monthly_clamps_to_short_months() {
        let habit = habit_created("2024-01-31", Frequency::monthly());
        assert!(habit.is_due_on(parse_date("2024-02-29").unwrap()));
        assert!(!habit.is_due_on(parse_date("2024-02-28").unwrap()));
        assert!(habit.is_due_on(parse_date("2024-03-31").unwrap()));
        assert!(habit.is_due_on(parse_date("2024-04-30").unwrap()));
    }

    #[test]
    fn update_sets_and_clears_optional_fields() {
        let mut habit = habit_created("2024-01-01", Frequency::daily());
        HabitUpdate {
            description: Some(Some("Two pages".into())),
            goal: Some(Some(30)),
            ..HabitUpdate::default()
        }
        .apply(&mut habit);
        assert_eq!(habit.description.as_deref(), Some("Two pages"));
        assert_eq!(habit.goal, Some(30));

        HabitUpdate {
            name: Some("Read more".into()),
            ..HabitUpdate::default()
        }
        .apply(&mut habit);
        assert_eq!(habit.goal, Some(30));

        HabitUpdate {
            description: Some(None),
            goal: Some(None),
            ..HabitUpdate::default()
        }
        .apply(&mut habit);
        assert!(habit.description.is_none());
        assert!(habit.goal.is_none());
        assert_eq!(habit.name, "Read more");
    }

    #[test]
    fn category_round_trips_through_str() {
        for cat in [HabitCategory::Spiritual, HabitCategory::Productivity, HabitCategory::Other] {
            assert_eq!(cat.as_str().parse::<HabitCategory>().unwrap(), cat);
        }
        assert!("hobby".parse::<HabitCategory>().is_err());
    }
}
