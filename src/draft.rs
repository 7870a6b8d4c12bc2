//! Validation of user-entered expense data.
//!
//! A [ExpenseDraft] holds the raw form values exactly as the user typed them.
//! [validate] checks the draft before any I/O happens and turns it into an
//! [Expense] with a numeric amount and an ID.

use std::fmt::Display;

use crate::expense::{Expense, ExpenseId};

/// A required expense field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// [Expense::name].
    Name,
    /// [Expense::amount].
    Amount,
    /// [Expense::category].
    Category,
    /// [Expense::date].
    Date,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Amount => "amount",
            Field::Category => "category",
            Field::Date => "date",
        };

        f.write_str(name)
    }
}

/// Errors for user input that must be fixed before it is saved or used.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("the {0} field is required")]
    MissingField(Field),

    /// The amount is not a number.
    #[error("\"{0}\" is not a valid amount, the amount must be a number")]
    InvalidAmount(String),

    /// A date could not be parsed as a `YYYY-MM-DD` calendar date.
    #[error("\"{0}\" is not a valid date, dates must be in the form YYYY-MM-DD")]
    InvalidDate(String),
}

/// Unvalidated expense data, e.g. from a form or command line arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseDraft {
    /// The ID of the expense being edited, `None` when creating an expense.
    pub id: Option<ExpenseId>,
    /// What the money was spent on.
    pub name: String,
    /// The amount as typed, parsed by [validate].
    pub amount: String,
    /// The category name.
    pub category: String,
    /// The date as typed, expected in `YYYY-MM-DD` form.
    pub date: String,
}

impl ExpenseDraft {
    /// Start a draft for a new expense.
    pub fn new(name: &str, amount: &str, category: &str, date: &str) -> Self {
        Self {
            id: None,
            name: name.to_owned(),
            amount: amount.to_owned(),
            category: category.to_owned(),
            date: date.to_owned(),
        }
    }

    /// Start a draft for editing `expense`, pre-filled with its current values.
    pub fn edit(expense: &Expense) -> Self {
        Self {
            id: Some(expense.id.clone()),
            name: expense.name.clone(),
            amount: expense.amount.to_string(),
            category: expense.category.clone(),
            date: expense.date.clone(),
        }
    }

    /// Whether saving this draft updates an existing expense.
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }
}

/// Check a draft and normalise it into an [Expense].
///
/// The existing ID is kept when editing, otherwise a fresh one is generated.
/// No range checks are done on the amount and the category is not checked
/// against the fixed set of categories.
///
/// # Errors
/// Returns a:
/// - [ValidationError::MissingField] if the name, amount, category or date is blank,
/// - or [ValidationError::InvalidAmount] if the amount is not a finite number.
pub fn validate(draft: &ExpenseDraft) -> Result<Expense, ValidationError> {
    let required = [
        (Field::Name, &draft.name),
        (Field::Amount, &draft.amount),
        (Field::Category, &draft.category),
        (Field::Date, &draft.date),
    ];

    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ValidationError::MissingField(*field));
    }

    let amount = parse_amount(&draft.amount)?;

    Ok(Expense {
        id: draft.id.clone().unwrap_or_else(ExpenseId::generate),
        name: draft.name.trim().to_owned(),
        amount,
        category: draft.category.trim().to_owned(),
        date: draft.date.trim().to_owned(),
    })
}

fn parse_amount(text: &str) -> Result<f64, ValidationError> {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(ValidationError::InvalidAmount(text.to_owned())),
    }
}

/// Check that an already typed expense, e.g. one received over the network,
/// has every required field.
///
/// # Errors
/// Returns [ValidationError::MissingField] for the first blank field, or
/// [ValidationError::InvalidAmount] if the amount is not finite.
pub fn check_required_fields(expense: &Expense) -> Result<(), ValidationError> {
    let required = [
        (Field::Name, &expense.name),
        (Field::Category, &expense.category),
        (Field::Date, &expense.date),
    ];

    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ValidationError::MissingField(*field));
    }

    if !expense.amount.is_finite() {
        return Err(ValidationError::InvalidAmount(expense.amount.to_string()));
    }

    Ok(())
}
