//! The in-memory expense list for the current session.
//!
//! State only changes through [ExpenseState::reduce], which takes an [Action]
//! and returns a new state without touching the old one. I/O lives in
//! [services](crate::services).

use crate::expense::{Expense, ExpenseId};

/// A change to apply to an [ExpenseState].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append an expense to the end of the list.
    Add(Expense),
    /// Replace the expense with the same ID, does nothing if there is none.
    Update(Expense),
    /// Remove the expense with this ID, does nothing if there is none.
    Remove(ExpenseId),
    /// Replace the whole list, e.g. after fetching it from the server.
    Set(Vec<Expense>),
}

/// The expenses known to the current session, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseState {
    expenses: Vec<Expense>,
}

impl ExpenseState {
    /// Create a state holding `expenses`.
    pub fn new(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    /// The expenses in insertion order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Find an expense by ID.
    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| &expense.id == id)
    }

    /// Whether an expense with `id` is in the list.
    pub fn contains(&self, id: &ExpenseId) -> bool {
        self.get(id).is_some()
    }

    /// Apply `action`, returning the resulting state.
    pub fn reduce(&self, action: Action) -> Self {
        let expenses = match action {
            Action::Add(expense) => {
                let mut expenses = self.expenses.clone();
                expenses.push(expense);
                expenses
            }
            Action::Update(updated) => self
                .expenses
                .iter()
                .map(|expense| {
                    if expense.id == updated.id {
                        updated.clone()
                    } else {
                        expense.clone()
                    }
                })
                .collect(),
            Action::Remove(id) => self
                .expenses
                .iter()
                .filter(|expense| expense.id != id)
                .cloned()
                .collect(),
            Action::Set(expenses) => expenses,
        };

        Self { expenses }
    }
}
