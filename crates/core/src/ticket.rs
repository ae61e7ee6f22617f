//! Ticket enumerations and validation.
//!
//! Category, priority and status are closed sets. Rows store the wire string
//! (`"in_progress"`, `"critical"`, ...); these enums are the single source of
//! the allowed values and their ordering in breakdowns.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

/// Maximum length for a ticket title (characters).
pub const MAX_TITLE_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// TicketCategory
// ---------------------------------------------------------------------------

/// Functional area a ticket belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    Billing,
    Technical,
    Account,
    General,
}

impl TicketCategory {
    /// Every category, in display order.
    pub const ALL: [TicketCategory; 4] = [
        TicketCategory::Billing,
        TicketCategory::Technical,
        TicketCategory::Account,
        TicketCategory::General,
    ];

    /// String representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketCategory::Billing => "billing",
            TicketCategory::Technical => "technical",
            TicketCategory::Account => "account",
            TicketCategory::General => "general",
        }
    }

    /// Parse a stored value. Returns `None` for anything outside the set.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

// ---------------------------------------------------------------------------
// TicketPriority
// ---------------------------------------------------------------------------

/// How urgently a ticket needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TicketPriority {
    /// Every priority, lowest first.
    pub const ALL: [TicketPriority; 4] = [
        TicketPriority::Low,
        TicketPriority::Medium,
        TicketPriority::High,
        TicketPriority::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Critical => "critical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

// ---------------------------------------------------------------------------
// TicketStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a ticket. Any status may be set from any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a category string is one of the known categories.
pub fn validate_category(category: &str) -> Result<TicketCategory, CoreError> {
    TicketCategory::parse(category).ok_or_else(|| {
        CoreError::Validation(format!(
            "Invalid category '{category}'. Must be one of: {:?}",
            TicketCategory::ALL.map(|c| c.as_str())
        ))
    })
}

/// Validate that a priority string is one of the known priorities.
pub fn validate_priority(priority: &str) -> Result<TicketPriority, CoreError> {
    TicketPriority::parse(priority).ok_or_else(|| {
        CoreError::Validation(format!(
            "Invalid priority '{priority}'. Must be one of: {:?}",
            TicketPriority::ALL.map(|p| p.as_str())
        ))
    })
}

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<TicketStatus, CoreError> {
    TicketStatus::parse(status).ok_or_else(|| {
        CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {:?}",
            TicketStatus::ALL.map(|s| s.as_str())
        ))
    })
}

/// Validate a ticket title: non-blank and at most [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Validate a ticket description: non-blank.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation("Description must not be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Build an `ILIKE` pattern matching `needle` as a literal substring.
///
/// Backslash, `%` and `_` are escaped with PostgreSQL's default `LIKE`
/// escape character so user input cannot act as a wildcard.
///
/// ```
/// use ticketdesk_core::ticket::contains_pattern;
/// assert_eq!(contains_pattern("refund"), "%refund%");
/// assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
/// ```
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Treat a blank query parameter as absent.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
