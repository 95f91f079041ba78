use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, Weekday};
use std::str::FromStr;
use uuid::Uuid;

use istiqamah::models::{
    DailyStats, Frequency, FrequencyKind, HabitCategory, HabitUpdate, LearningItem, LearningKind,
    NewHabit, NewLearningItem, NewTask, PrayerName, TaskCategory, TaskPriority, TaskUpdate,
    TimeOfDay, OBLIGATORY_PER_DAY,
};
use istiqamah::stats::STREAK_THRESHOLD;
use istiqamah::utils::date::{days_until, format_date, parse_date};
use istiqamah::models::finance::year_elapsed;
use istiqamah::utils::format::{format_rate, format_time, progress_bar};
use istiqamah::{SqliteStore, Tracker};

use crate::cli::args::{
    FinanceCommands, HabitCommands, LearnCommands, PrayerCommands, SettingsCommands, TaskCommands,
};

type App = Tracker<SqliteStore>;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Dashboard ───────────────────────────────────────────────────────────────

pub fn handle_dashboard(app: &App) -> Result<()> {
    let today = app.today();
    println!();
    println_colored!(GOLD, "  {}", today.format("%A, %d %B %Y"));
    print_prayers(app, today);

    let due = app.habits_due_on(today);
    if !due.is_empty() {
        println!();
        println_colored!(GOLD, "  Habits");
        for habit in due {
            if habit.is_completed_on(today) && !app.preferences().show_completed_habits {
                continue;
            }
            print_habit_line(habit, today);
        }
    }

    let tasks = app.tasks_for_date(today);
    if !tasks.is_empty() {
        println!();
        println_colored!(GOLD, "  Tasks");
        for task in tasks {
            print_task_line(task);
        }
    }
    println!();
    Ok(())
}

// ─── Habits ──────────────────────────────────────────────────────────────────

pub fn handle_habit(app: &mut App, action: &HabitCommands) -> Result<()> {
    match action {
        HabitCommands::Add {
            name,
            category,
            frequency,
            days,
            description,
            icon,
            color,
            goal,
        } => {
            let category = HabitCategory::from_str(category)?;
            let kind = FrequencyKind::from_str(frequency)?;
            let days = parse_weekdays(days)?;
            let frequency = match kind {
                FrequencyKind::Daily => Frequency::daily(),
                FrequencyKind::Weekly => Frequency::weekly(days),
                FrequencyKind::Monthly => Frequency::monthly(),
            };

            let mut new = NewHabit::new(name.clone(), category);
            new.frequency = frequency;
            new.description = description.clone();
            new.goal = *goal;
            if let Some(icon) = icon {
                new.icon = icon.clone();
            }
            if let Some(color) = color {
                new.color = color.clone();
            }

            let habit = app.add_habit(new);
            println_colored!(GREEN, "  ✓ Added habit: {} ({})", habit.name, short_id(habit.id));
        }
        HabitCommands::List { category, due } => {
            let today = app.today();
            let habits = match (category, due) {
                (Some(cat), _) => app.habits_in_category(HabitCategory::from_str(cat)?),
                (None, Some(date)) => app.habits_due_on(date_or_today(date.as_deref(), today)?),
                (None, None) => app.habits().all().iter().collect(),
            };
            println!();
            if habits.is_empty() {
                println_colored!(DIM, "  No habits yet. Add one with `istiqamah habit add <name>`");
            }
            for habit in habits {
                print_habit_line(habit, today);
            }
            println!();
        }
        HabitCommands::Done { id, date } => {
            let id = resolve_id(app.habits().all().iter().map(|h| h.id), id, "habit")?;
            let date = date_or_today(date.as_deref(), app.today())?;
            let completed = app.toggle_habit(id, date)?;
            let habit = app.habit(id).ok_or_else(|| anyhow!("Habit vanished after toggle"))?;
            if completed {
                println_colored!(
                    GREEN,
                    "  ✓ {} done for {} · streak {}",
                    habit.name,
                    format_date(date),
                    habit.streak
                );
            } else {
                println_colored!(DIM, "  ○ {} unmarked for {}", habit.name, format_date(date));
            }
        }
        HabitCommands::Edit {
            id,
            name,
            description,
            category,
            goal,
            clear_description,
            clear_goal,
        } => {
            let id = resolve_id(app.habits().all().iter().map(|h| h.id), id, "habit")?;
            let update = HabitUpdate {
                name: name.clone(),
                description: clearable(description.clone(), *clear_description),
                category: category.as_deref().map(HabitCategory::from_str).transpose()?,
                goal: clearable(*goal, *clear_goal),
                ..HabitUpdate::default()
            };
            let habit = app.update_habit(id, update)?;
            println_colored!(GREEN, "  ✓ Updated habit: {}", habit.name);
        }
        HabitCommands::Remove { id } => {
            let id = resolve_id(app.habits().all().iter().map(|h| h.id), id, "habit")?;
            let habit = app.remove_habit(id)?;
            println_colored!(AMBER, "  Removed habit: {}", habit.name);
        }
        HabitCommands::Stats { id } => {
            let id = resolve_id(app.habits().all().iter().map(|h| h.id), id, "habit")?;
            let stats = app.habit_stats(id)?;
            let habit = app.habit(id).ok_or_else(|| anyhow!("Habit not found"))?;
            println!();
            println_colored!(GOLD, "  {}", habit.name);
            println!();
            println_colored!(
                BOLD,
                "  Streak:      {} days current  |  {} days best",
                stats.current_streak,
                stats.longest_streak
            );
            println!("  Completions: {}", stats.total_completions);
            println!("  Rate:        {}", format_rate(stats.completion_rate));
            if let Some(goal) = habit.goal {
                println!(
                    "  Goal:        {} {}/{}",
                    progress_bar(stats.total_completions, goal, 12),
                    stats.total_completions,
                    goal
                );
            }
            println!();
        }
    }
    Ok(())
}

// ─── Prayers ─────────────────────────────────────────────────────────────────

pub fn handle_prayer(app: &mut App, action: &PrayerCommands) -> Result<()> {
    match action {
        PrayerCommands::Mark { prayer, date } => {
            let name = PrayerName::from_str(prayer).map_err(|_| {
                anyhow!(
                    "Unknown prayer '{}'. Use: fajr, dhuhr, asr, maghrib, isha, tahajjud",
                    prayer
                )
            })?;
            let date = date_or_today(date.as_deref(), app.today())?;
            if app.toggle_prayer(name, date) {
                println_colored!(GREEN, "  ✓ {} marked as done", name);
            } else {
                println_colored!(DIM, "  ○ {} unmarked", name);
            }
        }
        PrayerCommands::Today { date } => {
            let date = date_or_today(date.as_deref(), app.today())?;
            print_prayers(app, date);
            println!();
        }
        PrayerCommands::Week { date } => {
            let date = date_or_today(date.as_deref(), app.today())?;
            let grid = app.prayer_week(date);
            println!();
            println_colored!(DIM, "  ● = 5/5, ◕ = 3-4, ◑ = 1-2, ○ = 0/5");
            println!();
            for day in &grid.days {
                let (color, glyph) = week_glyph(day);
                let icon = format!("{}{}\x1b[0m", color, glyph);
                println!(
                    "  {}  {}  {}/{}",
                    day.date.format("%a %d"),
                    icon,
                    day.prayers_done,
                    day.prayers_total
                );
            }
            println!();
            println!(
                "  {} of {} obligatory prayers, {} full days",
                grid.total_done(),
                grid.days.len() as u32 * OBLIGATORY_PER_DAY as u32,
                grid.days_with_full_prayers()
            );
            println!();
        }
        PrayerCommands::Stats => {
            let stats = app.prayer_stats();
            let streak = app.prayer_streak_summary();
            println!();
            println_colored!(GOLD, "  Prayer statistics");
            println!();
            println_colored!(
                BOLD,
                "  Streak:   {} days current  |  {} days best",
                streak.current,
                streak.best
            );
            println!(
                "  Prayed:   {} of {} logged",
                stats.completed_prayers, stats.total_prayers
            );
            println!("  Rate:     {}", format_rate(stats.completion_rate));
            println!();
        }
    }
    Ok(())
}

// ─── Tasks ───────────────────────────────────────────────────────────────────

pub fn handle_task(app: &mut App, action: &TaskCommands) -> Result<()> {
    match action {
        TaskCommands::Add {
            title,
            priority,
            category,
            time,
            due,
            repeat,
            description,
        } => {
            let mut new = NewTask::new(title.clone());
            new.priority = TaskPriority::from_str(priority)?;
            new.category = TaskCategory::from_str(category)?;
            new.time_of_day = TimeOfDay::from_str(time)?;
            new.due_date = due.as_deref().map(parse_date).transpose()?;
            new.recurring_days = parse_weekdays(repeat)?;
            new.description = description.clone();
            let task = app.add_task(new);
            println_colored!(GREEN, "  ✓ Added task: {} ({})", task.title, short_id(task.id));
        }
        TaskCommands::List { date, time } => {
            let date = date_or_today(date.as_deref(), app.today())?;
            let slots: Vec<TimeOfDay> = match time {
                Some(t) => vec![TimeOfDay::from_str(t)?],
                None => TimeOfDay::all().to_vec(),
            };
            println!();
            for slot in slots {
                let tasks = app.tasks_for_time_of_day(date, slot);
                if tasks.is_empty() {
                    continue;
                }
                println_colored!(GOLD, "  {}", capitalize(slot.as_str()));
                for task in tasks {
                    print_task_line(task);
                }
                println!();
            }
            let stats = app.task_stats();
            println_colored!(
                DIM,
                "  {}/{} tasks complete ({})",
                stats.completed_tasks,
                stats.total_tasks,
                format_rate(stats.completion_rate)
            );
            println!();
        }
        TaskCommands::Done { id } => {
            let id = resolve_id(app.tasks().all().iter().map(|t| t.id), id, "task")?;
            let completed = app.toggle_task(id)?;
            let title = app.task(id).map(|t| t.title.clone()).unwrap_or_default();
            if completed {
                println_colored!(GREEN, "  ✓ {} done", title);
            } else {
                println_colored!(DIM, "  ○ {} reopened", title);
            }
        }
        TaskCommands::Edit {
            id,
            title,
            priority,
            due,
            clear_due,
        } => {
            let id = resolve_id(app.tasks().all().iter().map(|t| t.id), id, "task")?;
            let due = due.as_deref().map(parse_date).transpose()?;
            let update = TaskUpdate {
                title: title.clone(),
                priority: priority.as_deref().map(TaskPriority::from_str).transpose()?,
                due_date: clearable(due, *clear_due),
                ..TaskUpdate::default()
            };
            let task = app.update_task(id, update)?;
            println_colored!(GREEN, "  ✓ Updated task: {}", task.title);
        }
        TaskCommands::Remove { id } => {
            let id = resolve_id(app.tasks().all().iter().map(|t| t.id), id, "task")?;
            let task = app.remove_task(id)?;
            println_colored!(AMBER, "  Removed task: {}", task.title);
        }
    }
    Ok(())
}

// ─── Finance ─────────────────────────────────────────────────────────────────

pub fn handle_finance(app: &mut App, action: &FinanceCommands) -> Result<()> {
    match action {
        FinanceCommands::Show => {
            let finance = app.finance();
            println!();
            println_colored!(GOLD, "  Savings");
            println!(
                "  {} {} / {}  ({})",
                percent_bar(finance.savings_percentage()),
                finance.current_savings,
                finance.savings_goal,
                format_rate(finance.savings_percentage())
            );
            println!();
            println_colored!(GOLD, "  Investment");
            println!(
                "  {} {}/month · {}/year goal  ({})",
                percent_bar(finance.investment_percentage()),
                finance.monthly_investment,
                finance.yearly_investment_goal,
                format_rate(finance.investment_percentage())
            );
            let elapsed = year_elapsed(app.now());
            if app.investment_on_track() {
                println_colored!(GREEN, "  On track · {}% of the year gone", elapsed);
            } else {
                println_colored!(AMBER, "  Behind pace · {}% of the year gone", elapsed);
            }
            println!();
        }
        FinanceCommands::SavingsGoal { amount } => {
            app.set_savings_goal(*amount);
            println_colored!(GREEN, "  ✓ Savings goal set to {}", amount);
        }
        FinanceCommands::InvestmentGoal { amount } => {
            app.set_yearly_investment_goal(*amount);
            println_colored!(GREEN, "  ✓ Yearly investment goal set to {}", amount);
        }
        FinanceCommands::Save { amount } => {
            let balance = app.add_transaction(*amount);
            println_colored!(GREEN, "  ✓ Savings now {}", balance);
        }
        FinanceCommands::Invest { amount } => {
            let monthly = app.log_investment(*amount);
            println_colored!(GREEN, "  ✓ Investing {} per month", monthly);
        }
    }
    Ok(())
}

// ─── Learning ────────────────────────────────────────────────────────────────

pub fn handle_learn(app: &mut App, action: &LearnCommands) -> Result<()> {
    match action {
        LearnCommands::Book { title, author, pages } => {
            let item = app.add_learning_item(NewLearningItem::book(title.clone(), author.clone(), *pages));
            println_colored!(GREEN, "  ✓ Added book: {} ({})", item.title, short_id(item.id));
        }
        LearnCommands::Course {
            title,
            provider,
            modules,
        } => {
            let item =
                app.add_learning_item(NewLearningItem::course(title.clone(), provider.clone(), *modules));
            println_colored!(GREEN, "  ✓ Added course: {} ({})", item.title, short_id(item.id));
        }
        LearnCommands::List { kind, week } => {
            let items: Vec<&LearningItem> = match (kind, week) {
                (_, true) => app.learning_this_week(),
                (Some(kind), false) => app.learning_of_kind(LearningKind::from_str(kind)?),
                (None, false) => app.library().all().iter().collect(),
            };
            println!();
            if items.is_empty() {
                println_colored!(DIM, "  Nothing here yet. Add one with `istiqamah learn book <title> --pages N`");
            }
            for item in items {
                print_learning_line(item);
            }
            println!();
        }
        LearnCommands::Progress { id, value } => {
            let id = resolve_id(app.library().all().iter().map(|i| i.id), id, "item")?;
            let item = app.update_learning_progress(id, *value)?;
            if item.is_finished() {
                println_colored!(GREEN, "  ✓ Finished {}", item.title);
            } else {
                println_colored!(
                    GREEN,
                    "  ✓ {} · {}/{} {}",
                    item.title,
                    item.progress,
                    item.total,
                    item.kind.unit()
                );
            }
        }
        LearnCommands::Remove { id } => {
            let id = resolve_id(app.library().all().iter().map(|i| i.id), id, "item")?;
            let item = app.remove_learning_item(id)?;
            println_colored!(AMBER, "  Removed {}: {}", item.kind, item.title);
        }
    }
    Ok(())
}

// ─── Settings ────────────────────────────────────────────────────────────────

pub fn handle_settings(app: &mut App, action: &SettingsCommands) -> Result<()> {
    match action {
        SettingsCommands::Show => {
            let prefs = app.preferences();
            println!();
            println_colored!(GOLD, "  Preferences");
            println!();
            println!("  Reminder:         {}", on_off(prefs.reminder_enabled));
            println!("  Reminder time:    {}", format_time(prefs.reminder_time));
            println!("  Week starts on:   {}", prefs.week_starts_on);
            println!("  Completed habits: {}", if prefs.show_completed_habits { "shown" } else { "hidden" });
            println!("  Dark mode:        {}", on_off(prefs.dark_mode));
            println!();
        }
        SettingsCommands::Reminder => {
            let enabled = app.toggle_reminder();
            println_colored!(GREEN, "  ✓ Reminder {}", on_off(enabled));
        }
        SettingsCommands::ReminderTime { time } => {
            app.set_reminder_time(time)?;
            println_colored!(GREEN, "  ✓ Reminder set for {}", time);
        }
        SettingsCommands::WeekStart { day } => {
            let day = Weekday::from_str(day).map_err(|_| anyhow!("Unknown weekday '{}'", day))?;
            app.set_week_starts_on(day)?;
            println_colored!(GREEN, "  ✓ Weeks start on {}", day);
        }
        SettingsCommands::ShowCompleted => {
            let shown = app.toggle_show_completed_habits();
            println_colored!(GREEN, "  ✓ Completed habits {}", if shown { "shown" } else { "hidden" });
        }
        SettingsCommands::DarkMode => {
            let dark = app.toggle_dark_mode();
            println_colored!(GREEN, "  ✓ Dark mode {}", on_off(dark));
        }
    }
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(app: &App) -> Result<()> {
    let today = app.today();
    let prayer = app.prayer_stats();
    let streak = app.prayer_streak_summary();
    let tasks = app.task_stats();

    println!();
    println_colored!(GOLD, "  Statistics");
    println!();
    println_colored!(
        BOLD,
        "  Prayer streak: {} days current  |  {} days best",
        streak.current,
        streak.best
    );
    println!(
        "  Prayers:       {}  (today {})",
        format_rate(prayer.completion_rate),
        format_rate(app.prayer_completion_rate(today))
    );
    println!(
        "  Tasks:         {}/{}  ({})",
        tasks.completed_tasks,
        tasks.total_tasks,
        format_rate(tasks.completion_rate)
    );

    let habits = app.habits().all();
    if !habits.is_empty() {
        println!();
        println_colored!(GOLD, "  Habits");
        for habit in habits {
            let stats = app
                .habit_stats(habit.id)
                .with_context(|| format!("Computing stats for {}", habit.name))?;
            println!(
                "  {:<24}  {:>3}d  best {:>3}d  {}",
                habit.name,
                stats.current_streak,
                stats.longest_streak,
                format_rate(stats.completion_rate)
            );
        }
    }

    let upcoming: Vec<_> = app
        .tasks()
        .all()
        .iter()
        .filter(|t| !t.completed)
        .filter_map(|t| t.due_date.filter(|d| *d > today).map(|d| (t, d)))
        .collect();
    if !upcoming.is_empty() {
        println!();
        println_colored!(GOLD, "  Upcoming");
        for (task, due) in upcoming {
            println!("  {:<24}  in {} days", task.title, days_until(due, today));
        }
    }
    println!();
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn print_prayers(app: &App, date: NaiveDate) {
    println!();
    println_colored!(GOLD, "  Prayers · {}", format_date(date));
    for prayer in app.prayers_for_date(date) {
        if prayer.completed {
            println_colored!(GREEN, "  ✓ {}", prayer.name);
        } else {
            println_colored!(DIM, "  ○ {}", prayer.name);
        }
    }
    println_colored!(
        AMBER,
        "  {} of obligatory prayers  ·  streak {}",
        format_rate(app.prayer_completion_rate(date)),
        app.prayer_streak()
    );
}

fn print_habit_line(habit: &istiqamah::models::Habit, date: NaiveDate) {
    let mark = if habit.is_completed_on(date) {
        format!("{}✓\x1b[0m", GREEN)
    } else {
        "○".to_string()
    };
    println!(
        "  {} {:<24} {:<13} {:<8} {}d  {}",
        mark,
        habit.name,
        habit.category.as_str(),
        habit.frequency.kind.as_str(),
        habit.streak,
        short_id(habit.id)
    );
}

fn print_task_line(task: &istiqamah::models::Task) {
    let mark = if task.completed {
        format!("{}✓\x1b[0m", GREEN)
    } else {
        "○".to_string()
    };
    println!(
        "  {} {:<32} {:<7} {}",
        mark,
        task.title,
        task.priority.as_str(),
        short_id(task.id)
    );
}

fn date_or_today(arg: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match arg {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(today),
    }
}

fn parse_weekdays(days: &[String]) -> Result<Vec<Weekday>> {
    days.iter()
        .map(|d| Weekday::from_str(d.trim()).map_err(|_| anyhow!("Unknown weekday '{}'", d)))
        .collect()
}

/// Match a full id or a unique prefix of one.
fn resolve_id(ids: impl Iterator<Item = Uuid>, prefix: &str, kind: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(prefix) {
        return Ok(id);
    }
    let prefix = prefix.to_lowercase();
    let matches: Vec<Uuid> = ids.filter(|id| id.to_string().starts_with(&prefix)).collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("No {} matches '{}'", kind, prefix),
        _ => bail!("'{}' matches {} {}s; use more characters", prefix, matches.len(), kind),
    }
}

fn print_learning_line(item: &LearningItem) {
    let mark = if item.is_finished() {
        format!("{}✓\x1b[0m", GREEN)
    } else {
        "○".to_string()
    };
    println!(
        "  {} {:<28} {} {:>4}/{:<4} {:<7} {}",
        mark,
        item.title,
        progress_bar(item.progress, item.total, 12),
        item.progress,
        item.total,
        item.kind.unit(),
        short_id(item.id)
    );
}

/// Bar for a value already expressed in percent.
fn percent_bar(percent: f64) -> String {
    progress_bar(percent.round() as u32, 100, 16)
}

/// Full day, streak-qualifying day, some prayers, none.
fn week_glyph(day: &DailyStats) -> (&'static str, &'static str) {
    let ratio = day.completion_ratio();
    let qualifying = STREAK_THRESHOLD as f64 / OBLIGATORY_PER_DAY as f64;
    if ratio >= 1.0 {
        (GREEN, "●")
    } else if ratio >= qualifying {
        (AMBER, "◕")
    } else if ratio > 0.0 {
        (AMBER, "◑")
    } else {
        (DIM, "○")
    }
}

/// `Some(None)` when asked to clear, `Some(Some(v))` for a new value, else untouched.
fn clearable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear { Some(None) } else { value.map(Some) }
}

fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
