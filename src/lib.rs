#![forbid(unsafe_code)]

//! Local-first tracking of prayers, habits and tasks.
//!
//! - Completion ledgers per habit and per prayer-day
//! - Streak and completion-rate statistics derived from those ledgers
//! - A single `Tracker` state container that writes through to a `KvStore`

pub mod clock;
pub mod db;
pub mod error;
pub mod models;
pub mod stats;
pub mod store;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use db::{KvStore, MemoryStore, SqliteStore};
pub use error::{Error, Result};
pub use store::Tracker;
