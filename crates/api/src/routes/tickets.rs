//! Route definitions for tickets.
//!
//! Mounted at `/tickets` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{classify, tickets};
use crate::state::AppState;

/// Ticket routes.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /stats         -> stats
/// POST   /classify      -> classify
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> replace
/// PATCH  /{id}          -> update
/// DELETE /{id}          -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tickets::list).post(tickets::create))
        .route("/stats", get(tickets::stats))
        .route("/classify", post(classify::classify))
        .route(
            "/{id}",
            get(tickets::get_by_id)
                .put(tickets::replace)
                .patch(tickets::update)
                .delete(tickets::delete),
        )
}
