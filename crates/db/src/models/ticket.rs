//! Ticket entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ticketdesk_core::types::{DbId, Timestamp};

/// A row from the `tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ticket {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new ticket.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTicket {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    /// Defaults to `open` if omitted.
    pub status: Option<String>,
}

/// DTO for a full-field update (`PUT`).
///
/// `status` may be omitted, in which case the current status is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceTicket {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub status: Option<String>,
}

/// DTO for a partial update (`PATCH`). All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTicket {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl From<ReplaceTicket> for UpdateTicket {
    fn from(input: ReplaceTicket) -> Self {
        Self {
            title: Some(input.title),
            description: Some(input.description),
            category: Some(input.category),
            priority: Some(input.priority),
            status: input.status,
        }
    }
}

/// Query parameters for listing tickets.
///
/// Every field is optional; blank values are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketFilter {
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Single-row totals for the stats query.
#[derive(Debug, Clone, FromRow)]
pub struct TicketTotals {
    pub total_tickets: i64,
    pub open_tickets: i64,
    pub first_ticket_at: Option<Timestamp>,
}

/// A `GROUP BY` bucket: one distinct value and its row count.
#[derive(Debug, Clone, FromRow)]
pub struct ValueCount {
    pub value: String,
    pub count: i64,
}
