use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningKind {
    Book,
    Course,
}

impl LearningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningKind::Book => "book",
            LearningKind::Course => "course",
        }
    }

    /// What progress is counted in.
    pub fn unit(&self) -> &'static str {
        match self {
            LearningKind::Book => "pages",
            LearningKind::Course => "modules",
        }
    }
}

impl fmt::Display for LearningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LearningKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "book" | "books" => Ok(LearningKind::Book),
            "course" | "courses" => Ok(LearningKind::Course),
            _ => Err(Error::unknown("learning kind", s)),
        }
    }
}

/// A book read page by page or a course worked through module by module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningItem {
    pub id: Uuid,
    pub kind: LearningKind,
    pub title: String,
    /// Author of a book, provider of a course.
    #[serde(default)]
    pub creator: String,
    pub progress: u32,
    pub total: u32,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub updated_on: Option<NaiveDate>,
}

impl LearningItem {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.progress as f64 / self.total as f64 * 100.0
        }
    }

    pub fn is_finished(&self) -> bool {
        self.total > 0 && self.progress >= self.total
    }
}

#[derive(Debug, Clone)]
pub struct NewLearningItem {
    pub kind: LearningKind,
    pub title: String,
    pub creator: String,
    pub total: u32,
}

impl NewLearningItem {
    pub fn book(title: impl Into<String>, author: impl Into<String>, pages: u32) -> Self {
        Self {
            kind: LearningKind::Book,
            title: title.into(),
            creator: author.into(),
            total: pages,
        }
    }

    pub fn course(title: impl Into<String>, provider: impl Into<String>, modules: u32) -> Self {
        Self {
            kind: LearningKind::Course,
            title: title.into(),
            creator: provider.into(),
            total: modules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_and_completion() {
        let mut item = LearningItem {
            id: Uuid::new_v4(),
            kind: LearningKind::Book,
            title: "Atomic Habits".into(),
            creator: "James Clear".into(),
            progress: 80,
            total: 320,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap(),
            updated_on: None,
        };
        assert_eq!(item.percentage(), 25.0);
        assert!(!item.is_finished());
        item.progress = 320;
        assert!(item.is_finished());
    }

    #[test]
    fn kind_parsing() {
        assert_eq!("Books".parse::<LearningKind>().unwrap(), LearningKind::Book);
        assert_eq!(LearningKind::Course.unit(), "modules");
        assert!("podcast".parse::<LearningKind>().is_err());
    }
}
