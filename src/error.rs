use chrono::NaiveDate;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An id-addressed operation named an entity that does not exist.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid range: {since} is after {as_of}")]
    InvalidRange { since: NaiveDate, as_of: NaiveDate },

    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    #[error("Week can only start on Sunday or Monday, got {0}")]
    InvalidWeekStart(chrono::Weekday),

    #[error("Progress {progress} is outside 0..={total}")]
    InvalidProgress { progress: u32, total: u32 },

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Error::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Error::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}
