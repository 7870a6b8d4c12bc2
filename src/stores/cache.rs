//! Mirrors the expense list into a [KeyValueStore].

use crate::{
    Error,
    expense::{Expense, ExpenseId},
    stores::KeyValueStore,
};

/// The key the expense list is stored under.
pub const EXPENSES_KEY: &str = "expenses";

/// A best-effort local copy of the expense list, stored as a JSON array under
/// [EXPENSES_KEY].
///
/// Every change reads the whole list, changes it in memory and writes the whole
/// list back.
#[derive(Debug)]
pub struct ExpenseCache<S> {
    store: S,
}

impl<S> ExpenseCache<S>
where
    S: KeyValueStore,
{
    /// Create a cache backed by `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the cached expense list. An empty cache reads as an empty list.
    ///
    /// # Errors
    /// Returns an [Error::CorruptCache] if the stored value is not a JSON list
    /// of expenses, or any error from the store.
    pub fn load(&self) -> Result<Vec<Expense>, Error> {
        match self.store.read(EXPENSES_KEY)? {
            Some(json) => {
                serde_json::from_str(&json).map_err(|error| Error::CorruptCache(error.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite the cached list with `expenses`.
    pub fn replace_all(&self, expenses: &[Expense]) -> Result<(), Error> {
        let json = serde_json::to_string(expenses)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

        self.store.write(EXPENSES_KEY, &json)
    }

    /// Add `expense` to the end of the cached list.
    pub fn append(&self, expense: &Expense) -> Result<(), Error> {
        let mut expenses = self.load()?;
        expenses.push(expense.clone());

        self.replace_all(&expenses)
    }

    /// Replace the cached expense with the same ID as `expense`.
    ///
    /// Does nothing if the expense is not in the cache.
    pub fn replace(&self, expense: &Expense) -> Result<(), Error> {
        let mut expenses = self.load()?;

        match expenses.iter_mut().find(|cached| cached.id == expense.id) {
            Some(cached) => *cached = expense.clone(),
            None => {
                tracing::debug!("Expense {} is not cached, skipping cache update", expense.id);
                return Ok(());
            }
        }

        self.replace_all(&expenses)
    }

    /// Remove the expense with `id` from the cached list.
    pub fn remove(&self, id: &ExpenseId) -> Result<(), Error> {
        let mut expenses = self.load()?;
        expenses.retain(|expense| &expense.id != id);

        self.replace_all(&expenses)
    }
}
