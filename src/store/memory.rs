use std::sync::Arc;

use parking_lot::RwLock;

use crate::store::{Error, StateStorage, StateValue, StoredValue, downcast};

/// An in-memory state store for tests.
///
/// Entries live in a list owned by this instance and are kept in the order
/// their keys were first written. Values are stored as-is, so a typed read
/// returns exactly what was written.
///
/// ### Note
///
/// Do not use this in a production environment: nothing is shared between
/// instances and nothing outlives the instance.
#[derive(Debug, Default)]
pub struct MemoryState {
    entries: RwLock<Vec<(String, StoredValue)>>,
}

/// A stand-in for [`ApplicationState`](crate::ApplicationState) in tests.
pub type FakeApplicationState = MemoryState;

/// A stand-in for [`WebSession`](crate::WebSession) in tests.
pub type FakeWebSession = MemoryState;

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Keys in first-write order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().iter().map(|(key, _)| key.clone()).collect()
    }
}

impl StateStorage for MemoryState {
    type Value = StoredValue;

    fn clear(&self) {
        self.entries.write().clear();
    }

    fn get_value(&self, key: &str) -> Option<StoredValue> {
        self.entries
            .read()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| Arc::clone(value))
    }

    fn try_get<T: StateValue>(&self, key: &str) -> Result<Option<T>, Error> {
        self.get_value(key)
            .map(|value| downcast(key, &value))
            .transpose()
    }

    fn set_value(&self, key: &str, value: StoredValue) -> Result<(), Error> {
        let mut entries = self.entries.write();
        match entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => entries.push((key.to_string(), value)),
        }
        Ok(())
    }

    fn set<T: StateValue>(&self, key: &str, value: T) -> Result<(), Error> {
        self.set_value(key, Arc::new(value))
    }
}
