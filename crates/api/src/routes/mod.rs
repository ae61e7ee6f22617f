pub mod health;
pub mod tickets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tickets                 list (filters), create
/// /tickets/stats           aggregate statistics
/// /tickets/classify        category/priority suggestion (POST)
/// /tickets/{id}            get, replace (PUT), update (PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/tickets", tickets::router())
}
