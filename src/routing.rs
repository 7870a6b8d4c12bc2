//! Application router configuration for the reference expense service.

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::{
    AppState, endpoints,
    expense_endpoints::{
        create_expense_endpoint, delete_expense_endpoint, list_expenses_endpoint,
        update_expense_endpoint,
    },
    logging::logging_middleware,
};

/// Return a router with all the service's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            put(update_expense_endpoint).delete(delete_expense_endpoint),
        )
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{AppState, endpoints};

    use super::build_router;

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let connection = Connection::open_in_memory().unwrap();
        let state = AppState::new(connection).unwrap();
        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        server
            .get("/budgets")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get(endpoints::EXPENSES)
            .await
            .assert_status_ok();
    }
}
