//! Contains the local cache: a key-value store trait, its implementations and
//! the [ExpenseCache] that mirrors the expense list into it.

mod cache;
mod key_value;
mod memory;

pub mod sqlite;

pub use cache::{EXPENSES_KEY, ExpenseCache};
pub use key_value::KeyValueStore;
pub use memory::InMemoryKeyValueStore;
pub use sqlite::SQLiteKeyValueStore;
