//! Implements a key-value store that lives in memory.

use std::{collections::HashMap, sync::Mutex};

use crate::{Error, stores::KeyValueStore};

/// Keeps values in a hash map, nothing survives the process.
///
/// Useful for tests and for running without a cache file.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        let values = self.values.lock().map_err(|_| Error::DatabaseLockError)?;

        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut values = self.values.lock().map_err(|_| Error::DatabaseLockError)?;
        values.insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::stores::KeyValueStore;

    use super::InMemoryKeyValueStore;

    #[test]
    fn read_missing_key_is_none() {
        let store = InMemoryKeyValueStore::new();

        assert_eq!(store.read("expenses"), Ok(None));
    }

    #[test]
    fn write_overwrites_previous_value() {
        let store = InMemoryKeyValueStore::new();

        store.write("expenses", "[]").unwrap();
        store.write("expenses", "[1]").unwrap();

        assert_eq!(store.read("expenses"), Ok(Some("[1]".to_owned())));
    }
}
