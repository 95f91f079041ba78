//! The application state container.
//!
//! `Tracker` owns every domain collection together with the store it
//! hydrates from and writes through to. Create it with [`Tracker::load`]
//! at startup and hand it back with [`Tracker::close`] when done.

pub mod habits;
pub mod library;
pub mod prayers;
pub mod tasks;

pub use habits::HabitBook;
pub use library::Library;
pub use prayers::PrayerBook;
pub use tasks::TaskBoard;

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::clock::Clock;
use crate::db::KvStore;
use crate::error::{Error, Result};
use crate::models::{
    FinanceGoals, Habit, HabitCategory, HabitStats, HabitUpdate, LearningItem, LearningKind,
    NewHabit, NewLearningItem, NewTask, Prayer, PrayerLog, PrayerName, PrayerStats, Preferences,
    Streak, Task, TaskStats, TaskUpdate, TimeOfDay, WeeklyGrid,
};
use crate::utils::date::week_of;

pub const HABITS_KEY: &str = "habits";
pub const PRAYERS_KEY: &str = "prayers";
pub const TASKS_KEY: &str = "tasks";
pub const SETTINGS_KEY: &str = "settings";
pub const FINANCE_KEY: &str = "finance";
pub const LEARNING_KEY: &str = "learning";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Domain {
    Habits,
    Prayers,
    Tasks,
    Settings,
    Finance,
    Learning,
}

impl Domain {
    const ALL: [Domain; 6] = [
        Domain::Habits,
        Domain::Prayers,
        Domain::Tasks,
        Domain::Settings,
        Domain::Finance,
        Domain::Learning,
    ];

    fn key(self) -> &'static str {
        match self {
            Domain::Habits => HABITS_KEY,
            Domain::Prayers => PRAYERS_KEY,
            Domain::Tasks => TASKS_KEY,
            Domain::Settings => SETTINGS_KEY,
            Domain::Finance => FINANCE_KEY,
            Domain::Learning => LEARNING_KEY,
        }
    }
}

pub struct Tracker<S: KvStore> {
    store: S,
    clock: Box<dyn Clock>,
    habits: HabitBook,
    prayers: PrayerBook,
    tasks: TaskBoard,
    preferences: Preferences,
    finance: FinanceGoals,
    library: Library,
}

impl<S: KvStore> Tracker<S> {
    /// Hydrate every domain from `store`. Missing keys start empty; a blob
    /// that no longer parses is logged and replaced by an empty domain.
    pub fn load(store: S, clock: impl Clock + 'static) -> Result<Self> {
        let today = clock.today();
        let habits: Vec<Habit> = hydrate(&store, Domain::Habits)?;
        let logs: Vec<PrayerLog> = hydrate(&store, Domain::Prayers)?;
        let tasks: Vec<Task> = hydrate(&store, Domain::Tasks)?;
        let preferences: Preferences = hydrate(&store, Domain::Settings)?;
        let finance: FinanceGoals = hydrate(&store, Domain::Finance)?;
        let learning: Vec<LearningItem> = hydrate(&store, Domain::Learning)?;

        log::debug!("Loaded {} habits and {} tasks", habits.len(), tasks.len());

        Ok(Self {
            store,
            clock: Box::new(clock),
            habits: HabitBook::from_habits(habits, today),
            prayers: PrayerBook::from_logs(logs),
            tasks: TaskBoard::from_tasks(tasks),
            preferences,
            finance,
            library: Library::from_items(learning),
        })
    }

    /// Write every domain one last time and hand the store back.
    pub fn close(mut self) -> S {
        for domain in Domain::ALL {
            self.persist(domain);
        }
        self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self, domain: Domain) {
        let blob = match domain {
            Domain::Habits => serde_json::to_string(self.habits.all()),
            Domain::Prayers => serde_json::to_string(self.prayers.logs()),
            Domain::Tasks => serde_json::to_string(self.tasks.all()),
            Domain::Settings => serde_json::to_string(&self.preferences),
            Domain::Finance => serde_json::to_string(&self.finance),
            Domain::Learning => serde_json::to_string(self.library.all()),
        };
        let result = blob
            .map_err(Error::from)
            .and_then(|blob| self.store.save(domain.key(), &blob));
        match result {
            Ok(()) => log::debug!("Persisted {}", domain.key()),
            // The in-memory state stays authoritative; the next write retries.
            Err(e) => log::warn!("Failed to persist {}: {}", domain.key(), e),
        }
    }

    // ─── Habits ─────────────────────────────────────────────────────────────

    pub fn habits(&self) -> &HabitBook {
        &self.habits
    }

    pub fn habit(&self, id: Uuid) -> Option<&Habit> {
        self.habits.get(id)
    }

    pub fn add_habit(&mut self, new: NewHabit) -> Habit {
        let habit = self.habits.add(new, self.clock.now()).clone();
        self.persist(Domain::Habits);
        habit
    }

    pub fn remove_habit(&mut self, id: Uuid) -> Result<Habit> {
        let habit = self.habits.remove(id)?;
        self.persist(Domain::Habits);
        Ok(habit)
    }

    pub fn update_habit(&mut self, id: Uuid, update: HabitUpdate) -> Result<Habit> {
        let today = self.today();
        let habit = self.habits.update(id, update, today)?.clone();
        self.persist(Domain::Habits);
        Ok(habit)
    }

    /// Flip completion of habit `id` on `date`. Returns whether it is now completed.
    pub fn toggle_habit(&mut self, id: Uuid, date: NaiveDate) -> Result<bool> {
        let today = self.today();
        let completed = self.habits.toggle(id, date, today)?;
        self.persist(Domain::Habits);
        Ok(completed)
    }

    pub fn habits_completed_on(&self, date: NaiveDate) -> Vec<&Habit> {
        self.habits.completed_on(date).collect()
    }

    pub fn habits_in_category(&self, category: HabitCategory) -> Vec<&Habit> {
        self.habits.in_category(category).collect()
    }

    pub fn habits_due_on(&self, date: NaiveDate) -> Vec<&Habit> {
        self.habits.due_on(date).collect()
    }

    pub fn habit_stats(&self, id: Uuid) -> Result<HabitStats> {
        self.habits.stats(id, self.today())
    }

    // ─── Prayers ────────────────────────────────────────────────────────────

    pub fn prayers(&self) -> &PrayerBook {
        &self.prayers
    }

    /// Flip one prayer on `date`. Returns whether it is now completed.
    pub fn toggle_prayer(&mut self, name: PrayerName, date: NaiveDate) -> bool {
        let completed = self.prayers.toggle(name, date);
        self.persist(Domain::Prayers);
        completed
    }

    pub fn prayers_for_date(&self, date: NaiveDate) -> Vec<Prayer> {
        self.prayers.prayers_for(date)
    }

    pub fn prayer_completion_rate(&self, date: NaiveDate) -> f64 {
        self.prayers.completion_rate(date)
    }

    pub fn prayer_streak(&self) -> u32 {
        self.prayers.streak(self.today())
    }

    pub fn prayer_streak_summary(&self) -> Streak {
        self.prayers.streak_summary(self.today())
    }

    pub fn prayer_stats(&self) -> PrayerStats {
        self.prayers.stats(self.today())
    }

    /// Obligatory prayer counts for the week containing `date`.
    pub fn prayer_week(&self, date: NaiveDate) -> WeeklyGrid {
        self.prayers.grid(&week_of(date, self.preferences.week_starts_on))
    }

    // ─── Tasks ──────────────────────────────────────────────────────────────

    pub fn tasks(&self) -> &TaskBoard {
        &self.tasks
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn add_task(&mut self, new: NewTask) -> Task {
        let task = self.tasks.add(new, self.clock.now()).clone();
        self.persist(Domain::Tasks);
        task
    }

    pub fn remove_task(&mut self, id: Uuid) -> Result<Task> {
        let task = self.tasks.remove(id)?;
        self.persist(Domain::Tasks);
        Ok(task)
    }

    pub fn update_task(&mut self, id: Uuid, update: TaskUpdate) -> Result<Task> {
        let task = self.tasks.update(id, update)?.clone();
        self.persist(Domain::Tasks);
        Ok(task)
    }

    pub fn toggle_task(&mut self, id: Uuid) -> Result<bool> {
        let completed = self.tasks.toggle(id)?;
        self.persist(Domain::Tasks);
        Ok(completed)
    }

    pub fn tasks_for_date(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.for_date(date).collect()
    }

    pub fn tasks_for_time_of_day(&self, date: NaiveDate, time_of_day: TimeOfDay) -> Vec<&Task> {
        self.tasks.for_time_of_day(date, time_of_day).collect()
    }

    pub fn task_stats(&self) -> TaskStats {
        self.tasks.stats()
    }

    // ─── Preferences ────────────────────────────────────────────────────────

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn toggle_reminder(&mut self) -> bool {
        let enabled = self.preferences.toggle_reminder();
        self.persist(Domain::Settings);
        enabled
    }

    pub fn set_reminder_time(&mut self, time: &str) -> Result<()> {
        self.preferences.set_reminder_time(time)?;
        self.persist(Domain::Settings);
        Ok(())
    }

    pub fn set_week_starts_on(&mut self, day: Weekday) -> Result<()> {
        self.preferences.set_week_starts_on(day)?;
        self.persist(Domain::Settings);
        Ok(())
    }

    pub fn toggle_show_completed_habits(&mut self) -> bool {
        let shown = self.preferences.toggle_show_completed_habits();
        self.persist(Domain::Settings);
        shown
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        let dark = self.preferences.toggle_dark_mode();
        self.persist(Domain::Settings);
        dark
    }

    // ─── Finance ────────────────────────────────────────────────────────────

    pub fn finance(&self) -> &FinanceGoals {
        &self.finance
    }

    pub fn set_savings_goal(&mut self, amount: u64) {
        self.finance.set_savings_goal(amount);
        self.persist(Domain::Finance);
    }

    pub fn set_yearly_investment_goal(&mut self, amount: u64) {
        self.finance.set_yearly_investment_goal(amount);
        self.persist(Domain::Finance);
    }

    /// Returns the savings balance after the transaction.
    pub fn add_transaction(&mut self, amount: i64) -> u64 {
        let balance = self.finance.add_transaction(amount);
        self.persist(Domain::Finance);
        balance
    }

    /// Returns the new monthly investment rate.
    pub fn log_investment(&mut self, amount: u64) -> u64 {
        let monthly = self.finance.log_investment(amount);
        self.persist(Domain::Finance);
        monthly
    }

    pub fn investment_on_track(&self) -> bool {
        self.finance.investment_on_track(self.clock.now())
    }

    // ─── Learning ───────────────────────────────────────────────────────────

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn learning_item(&self, id: Uuid) -> Option<&LearningItem> {
        self.library.get(id)
    }

    pub fn add_learning_item(&mut self, new: NewLearningItem) -> LearningItem {
        let item = self.library.add(new, self.clock.now()).clone();
        self.persist(Domain::Learning);
        item
    }

    pub fn remove_learning_item(&mut self, id: Uuid) -> Result<LearningItem> {
        let item = self.library.remove(id)?;
        self.persist(Domain::Learning);
        Ok(item)
    }

    pub fn update_learning_progress(&mut self, id: Uuid, progress: u32) -> Result<LearningItem> {
        let today = self.today();
        let item = self.library.update_progress(id, progress, today)?.clone();
        self.persist(Domain::Learning);
        Ok(item)
    }

    pub fn learning_of_kind(&self, kind: LearningKind) -> Vec<&LearningItem> {
        self.library.of_kind(kind).collect()
    }

    /// Items with progress logged during the current week.
    pub fn learning_this_week(&self) -> Vec<&LearningItem> {
        self.library
            .updated_this_week(self.today(), self.preferences.week_starts_on)
            .collect()
    }
}

fn hydrate<S, T>(store: &S, domain: Domain) -> Result<T>
where
    S: KvStore,
    T: DeserializeOwned + Default,
{
    let Some(blob) = store.load(domain.key())? else {
        log::debug!("No {} blob stored, starting empty", domain.key());
        return Ok(T::default());
    };
    match serde_json::from_str(&blob) {
        Ok(value) => Ok(value),
        Err(e) => {
            log::warn!("Discarding unreadable {} blob: {}", domain.key(), e);
            Ok(T::default())
        }
    }
}
