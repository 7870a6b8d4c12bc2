//! Database queries for expenses.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    expense::{Expense, ExpenseId},
};

type RowsAffected = usize;

/// Create the expense table.
///
/// Expenses are listed in insertion order, which is the table's `rowid` order.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
            id TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            date TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Map a database row to an [Expense].
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: ExpenseId::new(row.get::<_, String>(0)?),
        name: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        date: row.get(4)?,
    })
}

/// Insert `expense` into the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateId] if an expense with the same ID already exists,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_expense(expense: &Expense, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(
            "INSERT INTO expense (id, name, amount, category, date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, name, amount, category, date",
        )?
        .query_row(
            (
                expense.id.as_str(),
                &expense.name,
                expense.amount,
                &expense.category,
                &expense.date,
            ),
            map_expense_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => Error::DuplicateId(expense.id.clone()),
            error => error.into(),
        })
}

/// Get every expense in insertion order.
pub fn get_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare("SELECT id, name, amount, category, date FROM expense ORDER BY rowid ASC")?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::from))
        .collect()
}

/// Replace every field of the expense `id` with those of `expense`.
pub fn update_expense(
    id: &ExpenseId,
    expense: &Expense,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE expense
            SET \
                name = ?1, \
                amount = ?2, \
                category = ?3, \
                date = ?4 \
            WHERE id = ?5",
            (
                &expense.name,
                expense.amount,
                &expense.category,
                &expense.date,
                id.as_str(),
            ),
        )
        .map_err(Error::from)
}

/// Delete the expense `id`.
pub fn delete_expense(id: &ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expense WHERE id = ?1", (id.as_str(),))
        .map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        expense::{Expense, ExpenseId},
        initialize_db,
    };

    use super::{create_expense, delete_expense, get_expenses, update_expense};

    fn must_create_test_connection() -> Connection {
        let connection =
            Connection::open_in_memory().expect("could not create in-memory SQLite database");
        initialize_db(&connection).expect("could not initialize test DB");

        connection
    }

    fn create_test_expense(id: &str, amount: f64) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            name: "Bus fare".to_owned(),
            amount,
            category: "Travel".to_owned(),
            date: "2024-03-02".to_owned(),
        }
    }

    #[test]
    fn create_returns_stored_expense() {
        let connection = must_create_test_connection();
        let expense = create_test_expense("1", 2.5);

        let created = create_expense(&expense, &connection).unwrap();

        assert_eq!(created, expense);
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let connection = must_create_test_connection();
        create_expense(&create_test_expense("1", 2.5), &connection).unwrap();

        let result = create_expense(&create_test_expense("1", 9.0), &connection);

        assert_eq!(result, Err(Error::DuplicateId(ExpenseId::new("1"))));
    }

    #[test]
    fn get_expenses_keeps_insertion_order() {
        let connection = must_create_test_connection();
        let want = vec![
            create_test_expense("9", 1.0),
            create_test_expense("1", 2.0),
            create_test_expense("5", 3.0),
        ];
        for expense in &want {
            create_expense(expense, &connection).unwrap();
        }

        let got = get_expenses(&connection).unwrap();

        assert_eq!(got, want);
    }

    #[test]
    fn update_changes_fields() {
        let connection = must_create_test_connection();
        create_expense(&create_test_expense("1", 2.5), &connection).unwrap();
        let want = Expense {
            name: "Taxi".to_owned(),
            amount: 30.0,
            ..create_test_expense("1", 0.0)
        };

        let rows_affected = update_expense(&want.id, &want, &connection).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(get_expenses(&connection).unwrap(), vec![want]);
    }

    #[test]
    fn update_missing_expense_affects_nothing() {
        let connection = must_create_test_connection();
        let expense = create_test_expense("404", 1.0);

        let rows_affected = update_expense(&expense.id, &expense, &connection).unwrap();

        assert_eq!(rows_affected, 0);
    }

    #[test]
    fn delete_removes_expense() {
        let connection = must_create_test_connection();
        create_expense(&create_test_expense("1", 2.5), &connection).unwrap();

        let rows_affected = delete_expense(&ExpenseId::new("1"), &connection).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(get_expenses(&connection).unwrap(), vec![]);
    }
}
