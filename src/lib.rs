//! Expense tracker: record expenses, keep them in sync with a REST service
//! and summarise them by date range and category.
//!
//! The library is split into:
//! - pure logic: [validate] for user input, [ExpenseState::reduce] for the
//!   session state and [aggregate] for dashboard totals,
//! - I/O: the [HttpExpenseApi] REST client, the [ExpenseCache] local mirror
//!   and the [ExpenseService] effects layer that ties them to the state,
//! - a reference REST server ([build_router]) that serves the `/expenses`
//!   resource from SQLite.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod aggregation;
mod app_state;
mod category;
mod config;
mod dashboard;
mod db;
mod draft;
pub mod endpoints;
mod expense;
mod expense_endpoints;
mod html;
mod logging;
mod remote;
mod routing;
mod services;
mod state;
pub mod stores;

pub use aggregation::{
    CategoryTotal, DateRange, Summary, aggregate, aggregate_range, format_date, parse_date,
};
pub use app_state::AppState;
pub use category::{Category, DEFAULT_CATEGORY_COLOR, UnknownCategory, category_color};
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_CACHE_PATH, DEFAULT_REQUEST_TIMEOUT};
pub use dashboard::render_dashboard;
pub use db::initialize as initialize_db;
pub use draft::{ExpenseDraft, Field, ValidationError, check_required_fields, validate};
pub use expense::{Expense, ExpenseId};
pub use html::format_currency;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use remote::{ExpenseApi, HttpExpenseApi, NetworkError};
pub use routing::build_router;
pub use services::{DataSource, ExpenseService, Loaded, SaveKind, Saved};
pub use state::{Action, ExpenseState};
pub use stores::{ExpenseCache, InMemoryKeyValueStore, KeyValueStore, SQLiteKeyValueStore};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for the Ctrl+C signal: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not listen for the terminate signal: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// User input was missing or malformed.
    ///
    /// Nothing has been sent or written when this error is returned.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The REST service could not be reached or answered with an error.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// An update or delete referred to an expense that does not exist.
    #[error("could not find an expense with the ID {0}")]
    NotFound(ExpenseId),

    /// An expense was created with an ID that is already in use.
    #[error("an expense with the ID {0} already exists")]
    DuplicateId(ExpenseId),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The cached expense list could not be parsed.
    #[error("the cached expenses are corrupt: {0}")]
    CorruptCache(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The dashboard report could not be written to disk.
    #[error("could not write the dashboard report: {0}")]
    ReportWriteError(String),
}

impl Error {
    /// Whether repeating the failed operation may succeed, e.g. after a
    /// dropped connection or a server error.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network(error) => error.is_retryable(),
            _ => false,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::DuplicateId(_) => StatusCode::CONFLICT,
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
