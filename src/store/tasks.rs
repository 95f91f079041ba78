use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{NewTask, Task, TaskStats, TaskUpdate, TimeOfDay};
use crate::stats::task_stats;

#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::not_found("task", id))
    }

    pub fn add(&mut self, new: NewTask, now: NaiveDateTime) -> &Task {
        self.tasks.push(Task {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            completed: false,
            priority: new.priority,
            category: new.category,
            time_of_day: new.time_of_day,
            due_date: new.due_date,
            recurring_days: new.recurring_days,
            created_at: now,
        });
        &self.tasks[self.tasks.len() - 1]
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Task> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::not_found("task", id))?;
        Ok(self.tasks.remove(idx))
    }

    pub fn update(&mut self, id: Uuid, update: TaskUpdate) -> Result<&Task> {
        let task = self.get_mut(id)?;
        update.apply(task);
        Ok(task)
    }

    /// Returns the new completion state.
    pub fn toggle(&mut self, id: Uuid) -> Result<bool> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    pub fn for_date(&self, date: NaiveDate) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(move |t| t.is_scheduled_on(date))
    }

    pub fn for_time_of_day(
        &self,
        date: NaiveDate,
        time_of_day: TimeOfDay,
    ) -> impl Iterator<Item = &Task> + '_ {
        self.for_date(date).filter(move |t| t.time_of_day == time_of_day)
    }

    pub fn stats(&self) -> TaskStats {
        task_stats(&self.tasks)
    }
}
