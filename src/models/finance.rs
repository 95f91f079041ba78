use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::utils::date::progress_percentage;

/// Savings target and yearly investment plan, in whole currency units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceGoals {
    #[serde(default)]
    pub savings_goal: u64,
    #[serde(default)]
    pub current_savings: u64,
    #[serde(default)]
    pub monthly_investment: u64,
    #[serde(default)]
    pub yearly_investment_goal: u64,
}

impl FinanceGoals {
    /// Saved share of the savings goal, capped at 100.
    pub fn savings_percentage(&self) -> f64 {
        capped_percentage(self.current_savings, self.savings_goal)
    }

    /// Twelve months at the current monthly rate, against the yearly goal, capped at 100.
    pub fn investment_percentage(&self) -> f64 {
        capped_percentage(self.monthly_investment.saturating_mul(12), self.yearly_investment_goal)
    }

    /// Record a deposit (positive) or withdrawal (negative). Savings never go below zero.
    pub fn add_transaction(&mut self, amount: i64) -> u64 {
        self.current_savings = self.current_savings.saturating_add_signed(amount);
        self.current_savings
    }

    /// Raise the monthly investment rate by `amount`.
    pub fn log_investment(&mut self, amount: u64) -> u64 {
        self.monthly_investment = self.monthly_investment.saturating_add(amount);
        self.monthly_investment
    }

    pub fn set_savings_goal(&mut self, amount: u64) {
        self.savings_goal = amount;
    }

    pub fn set_yearly_investment_goal(&mut self, amount: u64) {
        self.yearly_investment_goal = amount;
    }

    /// Whether the investment plan keeps pace with how much of the year has gone by.
    pub fn investment_on_track(&self, now: NaiveDateTime) -> bool {
        self.investment_percentage() >= year_elapsed(now) as f64
    }
}

/// Elapsed share of the calendar year containing `now`, in whole percent.
pub fn year_elapsed(now: NaiveDateTime) -> u8 {
    let year = now.year();
    let start = NaiveDate::from_ymd_opt(year, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    match (start, end) {
        (Some(start), Some(end)) => progress_percentage(start, end, now),
        _ => 0,
    }
}

fn capped_percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 100.0).min(100.0)
}
