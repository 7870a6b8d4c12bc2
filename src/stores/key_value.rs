//! Defines the key-value store trait.

use crate::Error;

/// A persisted store of string values under string keys.
///
/// Stores make no promise of atomicity across calls: a read followed by a
/// write can interleave with another caller's read and write.
pub trait KeyValueStore {
    /// Get the value stored under `key`, or `None` if nothing has been written.
    fn read(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), Error>;
}
