//! Sets up the server's SQLite database.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, expense_endpoints::create_expense_table};

/// Create all the tables the server needs, if they do not exist yet.
///
/// # Errors
/// Returns an [Error::SqlError] if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
