//! Contains the SQLite backed implementation of [KeyValueStore](crate::stores::KeyValueStore).

mod key_value;

pub use key_value::{SQLiteKeyValueStore, create_cache_table};
