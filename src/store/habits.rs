use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{CompletionSet, Habit, HabitCategory, HabitStats, HabitUpdate, NewHabit};
use crate::stats::{current_streak, habit_stats};

/// Flat collection of habits and their completion ledgers.
#[derive(Debug, Clone, Default)]
pub struct HabitBook {
    habits: Vec<Habit>,
}

impl HabitBook {
    /// Wrap loaded habits, refreshing every cached streak against `today`.
    pub fn from_habits(mut habits: Vec<Habit>, today: NaiveDate) -> Self {
        for habit in &mut habits {
            habit.streak = current_streak(&habit.completed_dates, today);
        }
        Self { habits }
    }

    pub fn all(&self) -> &[Habit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut Habit> {
        self.habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| Error::not_found("habit", id))
    }

    pub fn add(&mut self, new: NewHabit, now: NaiveDateTime) -> &Habit {
        let habit = Habit {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            icon: new.icon,
            color: new.color,
            category: new.category,
            frequency: new.frequency,
            goal: new.goal,
            created_at: now,
            completed_dates: CompletionSet::new(),
            streak: 0,
        };
        self.habits.push(habit);
        &self.habits[self.habits.len() - 1]
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Habit> {
        let idx = self
            .habits
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| Error::not_found("habit", id))?;
        Ok(self.habits.remove(idx))
    }

    pub fn update(&mut self, id: Uuid, update: HabitUpdate, today: NaiveDate) -> Result<&Habit> {
        let habit = self.get_mut(id)?;
        update.apply(habit);
        habit.streak = current_streak(&habit.completed_dates, today);
        Ok(habit)
    }

    /// Flip completion of `date` and refresh the cached streak. Returns
    /// whether the habit is now completed on `date`.
    pub fn toggle(&mut self, id: Uuid, date: NaiveDate, today: NaiveDate) -> Result<bool> {
        let habit = self.get_mut(id)?;
        let completed = habit.completed_dates.toggle(date);
        habit.streak = current_streak(&habit.completed_dates, today);
        Ok(completed)
    }

    pub fn completed_on(&self, date: NaiveDate) -> impl Iterator<Item = &Habit> + '_ {
        self.habits.iter().filter(move |h| h.is_completed_on(date))
    }

    pub fn in_category(&self, category: HabitCategory) -> impl Iterator<Item = &Habit> + '_ {
        self.habits.iter().filter(move |h| h.category == category)
    }

    pub fn due_on(&self, date: NaiveDate) -> impl Iterator<Item = &Habit> + '_ {
        self.habits.iter().filter(move |h| h.is_due_on(date))
    }

    pub fn stats(&self, id: Uuid, today: NaiveDate) -> Result<HabitStats> {
        let habit = self.get(id).ok_or_else(|| Error::not_found("habit", id))?;
        habit_stats(habit, today)
    }
}
