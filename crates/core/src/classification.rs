//! Classification suggestion types and the instruction template.
//!
//! A classification always produces a [`Suggestion`]. When the external
//! service could not supply one, the outcome is
//! [`ClassificationOutcome::Fallback`] carrying the default suggestion and the
//! failure description, so callers can tell the two apart.

use serde::{Deserialize, Serialize};

use crate::ticket::{TicketCategory, TicketPriority};

/// Category suggested when the service is unavailable.
pub const FALLBACK_CATEGORY: TicketCategory = TicketCategory::General;

/// Priority suggested when the service is unavailable.
pub const FALLBACK_PRIORITY: TicketPriority = TicketPriority::Medium;

/// A category/priority pair as returned by the suggestion service.
///
/// Values are passed through verbatim and are not checked against the
/// ticket enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub suggested_category: String,
    pub suggested_priority: String,
}

impl Suggestion {
    /// The default `general` / `medium` suggestion.
    pub fn fallback() -> Self {
        Self {
            suggested_category: FALLBACK_CATEGORY.as_str().to_string(),
            suggested_priority: FALLBACK_PRIORITY.as_str().to_string(),
        }
    }

    /// Parse the JSON object produced by the model.
    pub fn from_model_output(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

/// Result of classifying a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationOutcome {
    /// The service answered with a usable suggestion.
    Suggested(Suggestion),
    /// The service failed; `suggestion` holds the defaults.
    Fallback { suggestion: Suggestion, error: String },
}

impl ClassificationOutcome {
    /// Build a fallback outcome from any displayable failure.
    pub fn fallback(error: impl std::fmt::Display) -> Self {
        Self::Fallback {
            suggestion: Suggestion::fallback(),
            error: error.to_string(),
        }
    }

    pub fn suggestion(&self) -> &Suggestion {
        match self {
            Self::Suggested(s) => s,
            Self::Fallback { suggestion, .. } => suggestion,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Suggested(_) => None,
            Self::Fallback { error, .. } => Some(error),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Build the instruction sent to the suggestion service for `description`.
pub fn build_prompt(description: &str) -> String {
    let categories = TicketCategory::ALL.map(|c| c.as_str()).join(", ");
    let priorities = TicketPriority::ALL.map(|p| p.as_str()).join(", ");

    format!(
        "You are a support ticket classification assistant.\n\
         Given the following ticket description, suggest the most appropriate category and priority.\n\
         \n\
         Categories: {categories}\n\
         Priorities: {priorities}\n\
         \n\
         Description: {description}\n\
         \n\
         Respond ONLY with a valid JSON object:\n\
         {{\"suggested_category\": \"...\", \"suggested_priority\": \"...\"}}"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
