//! Handler for ticket classification suggestions.
//!
//! Only a missing or blank description is an error. When the suggestion
//! service fails the response is still `200 OK`, carrying the default
//! suggestion and an `error` field describing the failure.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use ticketdesk_core::classification::ClassificationOutcome;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::state::AppState;

/// Request body for `POST /tickets/classify`.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub description: String,
}

/// Response body for `POST /tickets/classify`.
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub suggested_category: String,
    pub suggested_priority: String,
    /// Present only when the defaults were substituted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ClassificationOutcome> for ClassifyResponse {
    fn from(outcome: ClassificationOutcome) -> Self {
        match outcome {
            ClassificationOutcome::Suggested(s) => Self {
                suggested_category: s.suggested_category,
                suggested_priority: s.suggested_priority,
                error: None,
            },
            ClassificationOutcome::Fallback { suggestion, error } => Self {
                suggested_category: suggestion.suggested_category,
                suggested_priority: suggestion.suggested_priority,
                error: Some(error),
            },
        }
    }
}

/// POST /api/v1/tickets/classify
pub async fn classify(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ClassifyRequest>,
) -> AppResult<Json<ClassifyResponse>> {
    let outcome = state.classifier.classify(&input.description).await?;

    Ok(Json(ClassifyResponse::from(outcome)))
}
