pub mod migrations;
pub mod repository;

pub use migrations::run_migrations;
pub use repository::SqliteStore;

use std::collections::HashMap;

use crate::error::Result;

/// Durable blob storage, one blob per key.
pub trait KvStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, blob: &str) -> Result<()>;
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<()> {
        (**self).save(key, blob)
    }
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<()> {
        self.entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("habits").unwrap(), None);
        store.save("habits", "[]").unwrap();
        store.save("habits", "[1]").unwrap();
        assert_eq!(store.load("habits").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.len(), 1);
    }
}
