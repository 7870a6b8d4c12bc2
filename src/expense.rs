//! The expense model and its identifier.

use std::{
    fmt::Display,
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

/// The unique, immutable identifier of an [Expense].
///
/// Client generated IDs are derived from the creation time in milliseconds,
/// see [ExpenseId::generate].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Create an ID from an existing string, e.g. one returned by the server.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh ID from the current Unix time in milliseconds.
    ///
    /// IDs generated within the same process are strictly increasing, so two
    /// expenses created in the same millisecond still get distinct IDs.
    pub fn generate() -> Self {
        static LAST_ID: AtomicU64 = AtomicU64::new(0);

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_millis() as u64)
            .unwrap_or_default();

        let mut last = LAST_ID.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match LAST_ID.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return Self(next.to_string()),
                Err(actual) => last = actual,
            }
        }
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Money spent on something, on a given day.
///
/// To create an expense from user input, build an
/// [ExpenseDraft](crate::ExpenseDraft) and [validate](crate::validate) it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// What the money was spent on, e.g. "Coffee".
    pub name: String,
    /// How much was spent.
    pub amount: f64,
    /// The category name, normally one of [Category](crate::Category).
    ///
    /// Stored as free text, only the presentation layer restricts the value
    /// to the fixed set of categories.
    pub category: String,
    /// When the money was spent, in `YYYY-MM-DD` form.
    pub date: String,
}
