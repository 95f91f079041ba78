pub mod date;
pub mod format;

pub use date::{format_date, parse_date};
