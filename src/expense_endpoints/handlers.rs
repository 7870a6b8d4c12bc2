//! Route handlers for the `/expenses` resource.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    draft::check_required_fields,
    expense::{Expense, ExpenseId},
    expense_endpoints::db::{create_expense, delete_expense, get_expenses, update_expense},
};

/// The JSON body for creating or replacing an expense.
///
/// The ID is optional: the server generates one for new expenses that lack
/// it, and the ID in the path takes precedence when replacing an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBody {
    /// The client's ID for the expense, if it has one.
    #[serde(default)]
    pub id: Option<ExpenseId>,
    /// What the money was spent on.
    pub name: String,
    /// How much was spent.
    pub amount: f64,
    /// The category name.
    pub category: String,
    /// When the money was spent, in `YYYY-MM-DD` form.
    pub date: String,
}

impl ExpenseBody {
    fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            name: self.name,
            amount: self.amount,
            category: self.category,
            date: self.date,
        }
    }
}

/// A route handler that responds with every expense in insertion order.
pub async fn list_expenses_endpoint(
    State(state): State<AppState>,
) -> Result<Json<Vec<Expense>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    get_expenses(&connection).map(Json)
}

/// A route handler for creating an expense, responds with the stored expense.
pub async fn create_expense_endpoint(
    State(state): State<AppState>,
    Json(body): Json<ExpenseBody>,
) -> Result<(StatusCode, Json<Expense>), Error> {
    let id = body.id.clone().unwrap_or_else(ExpenseId::generate);
    let expense = body.into_expense(id);
    check_required_fields(&expense)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let created = create_expense(&expense, &connection)?;
    tracing::info!("Created expense {}", created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

/// A route handler for replacing an expense, responds with the stored expense.
pub async fn update_expense_endpoint(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
    Json(body): Json<ExpenseBody>,
) -> Result<Json<Expense>, Error> {
    let id = ExpenseId::new(expense_id);
    let expense = body.into_expense(id.clone());
    check_required_fields(&expense)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    match update_expense(&id, &expense, &connection)? {
        0 => {
            tracing::warn!("Could not update expense {id}: no such expense");
            Err(Error::NotFound(id))
        }
        _ => {
            tracing::info!("Updated expense {id}");
            Ok(Json(expense))
        }
    }
}

/// A route handler for deleting an expense, responds with no content.
pub async fn delete_expense_endpoint(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
) -> Result<StatusCode, Error> {
    let id = ExpenseId::new(expense_id);

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    match delete_expense(&id, &connection)? {
        0 => {
            tracing::warn!("Could not delete expense {id}: no such expense");
            Err(Error::NotFound(id))
        }
        _ => {
            tracing::info!("Deleted expense {id}");
            Ok(StatusCode::NO_CONTENT)
        }
    }
}
