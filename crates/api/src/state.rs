use std::sync::Arc;

use ticketdesk_classifier::ClassificationGateway;

/// Shared state handed to every handler via `State<AppState>`. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: ticketdesk_db::DbPool,
    /// Gateway to the external suggestion service.
    pub classifier: Arc<ClassificationGateway>,
}
