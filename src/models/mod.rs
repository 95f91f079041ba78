pub mod completion;
pub mod finance;
pub mod habit;
pub mod learning;
pub mod preferences;
pub mod prayer;
pub mod stats;
pub mod task;

pub use completion::CompletionSet;
pub use finance::FinanceGoals;
pub use habit::{Frequency, FrequencyKind, Habit, HabitCategory, HabitUpdate, NewHabit};
pub use learning::{LearningItem, LearningKind, NewLearningItem};
pub use preferences::Preferences;
pub use prayer::{Prayer, PrayerLog, PrayerName, OBLIGATORY_PER_DAY};
pub use stats::{DailyStats, HabitStats, PrayerStats, Streak, TaskStats, WeeklyGrid};
pub use task::{NewTask, Task, TaskCategory, TaskPriority, TaskUpdate, TimeOfDay};
