//! The `/expenses` REST resource served by the reference server.
//!
//! This module contains:
//! - the database functions for storing expenses in SQLite
//! - the route handlers for listing, creating, updating and deleting expenses

mod db;
mod handlers;

pub use db::create_expense_table;
pub use handlers::{
    create_expense_endpoint, delete_expense_endpoint, list_expenses_endpoint,
    update_expense_endpoint,
};
