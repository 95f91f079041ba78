use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::High => "high",
            TaskPriority::Medium => "medium",
            TaskPriority::Low => "low",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(TaskPriority::High),
            "medium" => Ok(TaskPriority::Medium),
            "low" => Ok(TaskPriority::Low),
            _ => Err(Error::unknown("task priority", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Work,
    Personal,
    Spiritual,
    Health,
    Learning,
    Finance,
    Other,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Work => "work",
            TaskCategory::Personal => "personal",
            TaskCategory::Spiritual => "spiritual",
            TaskCategory::Health => "health",
            TaskCategory::Learning => "learning",
            TaskCategory::Finance => "finance",
            TaskCategory::Other => "other",
        }
    }
}

impl FromStr for TaskCategory {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "work" => Ok(TaskCategory::Work),
            "personal" => Ok(TaskCategory::Personal),
            "spiritual" => Ok(TaskCategory::Spiritual),
            "health" => Ok(TaskCategory::Health),
            "learning" => Ok(TaskCategory::Learning),
            "finance" => Ok(TaskCategory::Finance),
            "other" => Ok(TaskCategory::Other),
            _ => Err(Error::unknown("task category", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub fn all() -> [TimeOfDay; 3] {
        [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            _ => Err(Error::unknown("time of day", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub time_of_day: TimeOfDay,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Weekdays a recurring task repeats on. Empty means not recurring.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recurring_days: Vec<Weekday>,
    pub created_at: NaiveDateTime,
}

impl Task {
    pub fn is_recurring(&self) -> bool {
        !self.recurring_days.is_empty()
    }

    /// A due date wins over recurrence; a task with neither belongs to the day it was created.
    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        if let Some(due) = self.due_date {
            return due == date;
        }
        if self.is_recurring() {
            return self.recurring_days.contains(&date.weekday());
        }
        self.created_at.date() == date
    }
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub time_of_day: TimeOfDay,
    pub due_date: Option<NaiveDate>,
    pub recurring_days: Vec<Weekday>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: TaskPriority::Medium,
            category: TaskCategory::Personal,
            time_of_day: TimeOfDay::Morning,
            due_date: None,
            recurring_days: Vec::new(),
        }
    }
}

/// Partial update; `None` fields are left untouched. `Some(None)` clears an
/// optional field.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub priority: Option<TaskPriority>,
    pub category: Option<TaskCategory>,
    pub time_of_day: Option<TimeOfDay>,
    pub due_date: Option<Option<NaiveDate>>,
    pub recurring_days: Option<Vec<Weekday>>,
}

impl TaskUpdate {
    pub(crate) fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(time_of_day) = self.time_of_day {
            task.time_of_day = time_of_day;
        }
        if let Some(due) = self.due_date {
            task.due_date = due;
        }
        if let Some(days) = self.recurring_days {
            task.recurring_days = days;
        }
    }
}
