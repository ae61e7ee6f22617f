//! Classification gateway.
//!
//! Rejects an empty description, makes exactly one call to the suggestion
//! service, and converts any failure into
//! [`ClassificationOutcome::Fallback`]. Only invalid input is reported as an
//! error; service failures never are.

use std::sync::Arc;

use ticketdesk_core::classification::ClassificationOutcome;
use ticketdesk_core::error::CoreError;

use crate::client::{ChatCompletionClient, SuggestionError, SuggestionService};
use crate::config::ClassifierConfig;

/// Front door for ticket classification.
#[derive(Clone)]
pub struct ClassificationGateway {
    service: Arc<dyn SuggestionService>,
    configured: bool,
}

impl ClassificationGateway {
    pub fn new(service: Arc<dyn SuggestionService>) -> Self {
        Self {
            service,
            configured: true,
        }
    }

    /// Build a gateway backed by [`ChatCompletionClient`].
    pub fn from_config(config: ClassifierConfig) -> Result<Self, SuggestionError> {
        let configured = config.api_key.is_some();
        if !configured {
            tracing::warn!("No classification API key configured; suggestions will use defaults");
        }
        let client = ChatCompletionClient::new(config)?;
        Ok(Self {
            service: Arc::new(client),
            configured,
        })
    }

    /// Whether suggestions can reach the service at all. `false` means every
    /// classification returns the defaults.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Suggest a category and priority for `description`.
    ///
    /// Returns `Err(CoreError::Validation)` for an empty description without
    /// contacting the service. Every other path returns `Ok`, including
    /// whitespace-only input, which is forwarded as is.
    pub async fn classify(&self, description: &str) -> Result<ClassificationOutcome, CoreError> {
        if description.is_empty() {
            return Err(CoreError::Validation("Description required".into()));
        }

        match self.service.suggest(description).await {
            Ok(suggestion) => {
                tracing::debug!(
                    category = %suggestion.suggested_category,
                    priority = %suggestion.suggested_priority,
                    "Classification suggested",
                );
                Ok(ClassificationOutcome::Suggested(suggestion))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Classification failed, using default suggestion");
                Ok(ClassificationOutcome::fallback(e))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
