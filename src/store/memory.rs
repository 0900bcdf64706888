//! In-process store. Used by tests and handy for a throwaway server.

use crate::store::{Store, StoreError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
    writes: RwLock<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths written so far, oldest first.
    pub fn write_log(&self) -> Vec<String> {
        self.writes.read().map(|w| w.clone()).unwrap_or_default()
    }

    /// Current raw value at `path`, bypassing the async API.
    pub fn peek(&self, path: &str) -> Option<Value> {
        self.values.read().ok()?.get(path).cloned()
    }

    /// Seed a raw value without counting it as a write.
    pub fn insert(&self, path: &str, value: Value) {
        if let Ok(mut g) = self.values.write() {
            g.insert(path.to_string(), value);
        }
    }
}

impl Store for MemoryStore {
    async fn read(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let g = self
            .values
            .read()
            .map_err(|_| StoreError::Unavailable("lock error".to_string()))?;
        Ok(g.get(path).cloned())
    }

    async fn write(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let mut g = self
            .values
            .write()
            .map_err(|_| StoreError::Unavailable("lock error".to_string()))?;
        g.insert(path.to_string(), value);
        drop(g);
        if let Ok(mut w) = self.writes.write() {
            w.push(path.to_string());
        }
        Ok(())
    }
}
