//! Ticket statistics.
//!
//! The repository layer gathers raw aggregates with SQL; [`TicketStats`] turns
//! them into the summary returned by the stats endpoint. The average is taken
//! over the whole lifetime of the ticket set, not a rolling window.

use indexmap::IndexMap;
use serde::Serialize;

use crate::ticket::{TicketCategory, TicketPriority};
use crate::types::Timestamp;

/// Raw aggregates over the full ticket set.
#[derive(Debug, Clone, Default)]
pub struct TicketAggregates {
    pub total: i64,
    pub open: i64,
    /// `MIN(created_at)`; `None` when there are no tickets.
    pub earliest_created_at: Option<Timestamp>,
    /// `(priority, count)` pairs as grouped by the database.
    pub priority_counts: Vec<(String, i64)>,
    /// `(category, count)` pairs as grouped by the database.
    pub category_counts: Vec<(String, i64)>,
}

/// Summary statistics over all tickets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketStats {
    pub total_tickets: i64,
    pub open_tickets: i64,
    pub avg_tickets_per_day: f64,
    pub priority_breakdown: IndexMap<&'static str, i64>,
    pub category_breakdown: IndexMap<&'static str, i64>,
}

impl TicketStats {
    /// Compute the summary from raw aggregates as of `now`.
    pub fn from_aggregates(aggregates: &TicketAggregates, now: Timestamp) -> Self {
        let days = days_active(aggregates.earliest_created_at, now);

        let mut priority_breakdown: IndexMap<&'static str, i64> =
            TicketPriority::ALL.iter().map(|p| (p.as_str(), 0)).collect();
        for (value, count) in &aggregates.priority_counts {
            if let Some(p) = TicketPriority::parse(value) {
                priority_breakdown.insert(p.as_str(), *count);
            }
        }

        let mut category_breakdown: IndexMap<&'static str, i64> =
            TicketCategory::ALL.iter().map(|c| (c.as_str(), 0)).collect();
        for (value, count) in &aggregates.category_counts {
            if let Some(c) = TicketCategory::parse(value) {
                category_breakdown.insert(c.as_str(), *count);
            }
        }

        Self {
            total_tickets: aggregates.total,
            open_tickets: aggregates.open,
            avg_tickets_per_day: round_one_decimal(aggregates.total as f64 / days as f64),
            priority_breakdown,
            category_breakdown,
        }
    }
}

/// Whole days elapsed since `earliest`, floored, minimum 1.
///
/// With no tickets the reference point is `now`, which also yields 1.
pub fn days_active(earliest: Option<Timestamp>, now: Timestamp) -> i64 {
    let earliest = earliest.unwrap_or(now);
    (now - earliest).num_days().max(1)
}

/// Round to one decimal place, sending halves to the even neighbour.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
