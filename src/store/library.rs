use chrono::{NaiveDate, NaiveDateTime, Weekday};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{LearningItem, LearningKind, NewLearningItem};
use crate::utils::date::is_same_week;

/// Books and courses in progress.
#[derive(Debug, Clone, Default)]
pub struct Library {
    items: Vec<LearningItem>,
}

impl Library {
    pub fn from_items(items: Vec<LearningItem>) -> Self {
        Self { items }
    }

    pub fn all(&self) -> &[LearningItem] {
        &self.items
    }

    pub fn get(&self, id: Uuid) -> Option<&LearningItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn of_kind(&self, kind: LearningKind) -> impl Iterator<Item = &LearningItem> + '_ {
        self.items.iter().filter(move |i| i.kind == kind)
    }

    pub fn add(&mut self, new: NewLearningItem, now: NaiveDateTime) -> &LearningItem {
        self.items.push(LearningItem {
            id: Uuid::new_v4(),
            kind: new.kind,
            title: new.title,
            creator: new.creator,
            progress: 0,
            total: new.total,
            created_at: now,
            updated_on: None,
        });
        &self.items[self.items.len() - 1]
    }

    pub fn remove(&mut self, id: Uuid) -> Result<LearningItem> {
        let idx = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| Error::not_found("learning item", id))?;
        Ok(self.items.remove(idx))
    }

    /// Set pages read or modules done. Values past the item's total are rejected.
    pub fn update_progress(&mut self, id: Uuid, progress: u32, today: NaiveDate) -> Result<&LearningItem> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| Error::not_found("learning item", id))?;
        if progress > item.total {
            return Err(Error::InvalidProgress {
                progress,
                total: item.total,
            });
        }
        item.progress = progress;
        item.updated_on = Some(today);
        Ok(item)
    }

    /// Items whose progress moved during the week containing `today`.
    pub fn updated_this_week(
        &self,
        today: NaiveDate,
        starts_on: Weekday,
    ) -> impl Iterator<Item = &LearningItem> + '_ {
        self.items.iter().filter(move |i| {
            i.updated_on
                .is_some_and(|day| day <= today && is_same_week(day, today, starts_on))
        })
    }
}
