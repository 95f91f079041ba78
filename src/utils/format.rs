use chrono::NaiveTime;

/// Format a NaiveTime to "HH:MM"
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Format a percentage, dropping the decimal for whole numbers
pub fn format_rate(rate: f64) -> String {
    if rate == rate.floor() {
        format!("{}%", rate as i64)
    } else {
        format!("{:.1}%", rate)
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_trim_whole_numbers() {
        assert_eq!(format_rate(50.0), "50%");
        assert_eq!(format_rate(33.333), "33.3%");
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(3, 5, 5), "███░░");
        assert_eq!(progress_bar(9, 5, 5), "█████");
        assert_eq!(progress_bar(0, 0, 3), "░░░");
    }
}
