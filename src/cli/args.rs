use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "istiqamah", version, author, about = "Track prayers, habits and tasks from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: HabitCommands,
    },
    /// Daily prayer log
    Prayer {
        #[command(subcommand)]
        action: PrayerCommands,
    },
    /// Task list
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Savings and investment goals
    Finance {
        #[command(subcommand)]
        action: FinanceCommands,
    },
    /// Books and courses in progress
    Learn {
        #[command(subcommand)]
        action: LearnCommands,
    },
    /// View or change preferences
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
    /// Show an overview of streaks and completion rates
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum HabitCommands {
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
        /// spiritual, health, learning, finance, productivity or other
        #[arg(long, default_value = "other")]
        category: String,
        /// daily, weekly or monthly
        #[arg(long, default_value = "daily")]
        frequency: String,
        /// Weekdays for weekly habits, e.g. mon,wed,fri
        #[arg(long, value_delimiter = ',')]
        days: Vec<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
        /// Target number of completions
        #[arg(long)]
        goal: Option<u32>,
    },
    /// List habits
    List {
        /// Only habits in this category
        #[arg(long)]
        category: Option<String>,
        /// Only habits due on this date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        due: Option<Option<String>>,
    },
    /// Toggle a habit's completion for a day
    Done {
        /// Habit id or a unique prefix of it
        id: String,
        /// Day to toggle (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Change a habit's details
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, conflicts_with = "clear_goal")]
        goal: Option<u32>,
        /// Remove the description
        #[arg(long)]
        clear_description: bool,
        /// Remove the completion goal
        #[arg(long)]
        clear_goal: bool,
    },
    /// Delete a habit
    Remove { id: String },
    /// Show streaks and completion rate for a habit
    Stats { id: String },
}

#[derive(Subcommand, Debug)]
pub enum PrayerCommands {
    /// Toggle a prayer for a day
    Mark {
        /// Prayer name (fajr, dhuhr, asr, maghrib, isha, tahajjud)
        prayer: String,
        /// Day to mark (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the prayers logged for a day
    Today {
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the week around a day
    Week {
        #[arg(long)]
        date: Option<String>,
    },
    /// Show prayer statistics
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Add a task
    Add {
        title: String,
        /// high, medium or low
        #[arg(long, default_value = "medium")]
        priority: String,
        /// work, personal, spiritual, health, learning, finance or other
        #[arg(long, default_value = "personal")]
        category: String,
        /// morning, afternoon or evening
        #[arg(long, default_value = "morning")]
        time: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Repeat on these weekdays, e.g. tue,thu
        #[arg(long, value_delimiter = ',')]
        repeat: Vec<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List tasks scheduled for a day
    List {
        #[arg(long)]
        date: Option<String>,
        /// Only tasks for this time of day
        #[arg(long)]
        time: Option<String>,
    },
    /// Toggle a task's completion
    Done { id: String },
    /// Change a task's details
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },
    /// Delete a task
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum FinanceCommands {
    /// Show progress towards savings and investment goals
    Show,
    /// Set the savings goal
    SavingsGoal { amount: u64 },
    /// Set the yearly investment goal
    InvestmentGoal { amount: u64 },
    /// Add to savings; negative amounts are withdrawals
    Save {
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },
    /// Raise the monthly investment by an amount
    Invest { amount: u64 },
}

#[derive(Subcommand, Debug)]
pub enum LearnCommands {
    /// Start tracking a book
    Book {
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        /// Total pages
        #[arg(long)]
        pages: u32,
    },
    /// Start tracking a course
    Course {
        title: String,
        #[arg(long, default_value = "")]
        provider: String,
        /// Total modules
        #[arg(long)]
        modules: u32,
    },
    /// List books and courses
    List {
        /// Only books or only courses
        #[arg(long)]
        kind: Option<String>,
        /// Only items updated this week
        #[arg(long)]
        week: bool,
    },
    /// Set pages read or modules finished
    Progress {
        /// Item id or a unique prefix of it
        id: String,
        value: u32,
    },
    /// Stop tracking an item
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print current preferences
    Show,
    /// Turn the daily reminder on or off
    Reminder,
    /// Set the reminder time (HH:MM)
    ReminderTime { time: String },
    /// First day of the week: sunday or monday
    WeekStart { day: String },
    /// Show or hide completed habits
    ShowCompleted,
    /// Toggle dark mode
    DarkMode,
}
