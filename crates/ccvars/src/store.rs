//! the legacy variable environment the translation writes into
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::sync::{Mutex, MutexGuard};

/// Process wide key/value store holding legacy variables
///
/// Implementations shared between concurrent translations must serialize writes.
pub trait VariableStore {
    /// Fails with [Error::VariableNotFound] when `name` is not set
    fn get(&self, name: &str) -> Result<String>;

    fn set(&self, name: &str, value: &str);

    /// Write all `variables` as a single update
    fn set_batch(&self, variables: &IndexMap<String, String>);
}

/// In memory [VariableStore]
#[derive(Debug, Default)]
pub struct MemoryStore {
    variables: Mutex<IndexMap<String, String>>,
}

impl MemoryStore {
    pub fn new(variables: IndexMap<String, String>) -> Self {
        Self {
            variables: Mutex::new(variables),
        }
    }

    /// Copy of every variable currently set
    pub fn snapshot(&self) -> IndexMap<String, String> {
        self.lock().clone()
    }

    // a panic while holding the lock never leaves the map half written
    fn lock(&self) -> MutexGuard<'_, IndexMap<String, String>> {
        self.variables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl VariableStore for MemoryStore {
    fn get(&self, name: &str) -> Result<String> {
        self.lock()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::VariableNotFound(name.to_string()))
    }

    fn set(&self, name: &str, value: &str) {
        self.lock().insert(name.to_string(), value.to_string());
    }

    fn set_batch(&self, variables: &IndexMap<String, String>) {
        let mut store = self.lock();
        for (name, value) in variables {
            store.insert(name.clone(), value.clone());
        }
        tracing::debug!(count = variables.len(), "variables written");
    }
}
