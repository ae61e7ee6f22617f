//! Repository for the `tickets` table.

use sqlx::PgPool;
use ticketdesk_core::stats::TicketAggregates;
use ticketdesk_core::ticket::{contains_pattern, non_empty, TicketStatus};
use ticketdesk_core::types::DbId;

use crate::models::ticket::{
    CreateTicket, Ticket, TicketFilter, TicketTotals, UpdateTicket, ValueCount,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, category, priority, status, created_at";

/// Default ordering: newest first, ties broken by id.
const ORDER_BY: &str = "ORDER BY created_at DESC, id DESC";

/// Provides CRUD, filtering and aggregate queries for tickets.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a new ticket, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `open`.
    pub async fn create(pool: &PgPool, input: &CreateTicket) -> Result<Ticket, sqlx::Error> {
        let query = format!(
            "INSERT INTO tickets (title, description, category, priority, status)
             VALUES ($1, $2, $3, $4, COALESCE($5, $6))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.priority)
            .bind(&input.status)
            .bind(TicketStatus::default().as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a ticket by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tickets matching every supplied filter, newest first.
    ///
    /// `category`, `priority` and `status` compare for equality. `search`
    /// matches a case-insensitive substring of the title or the description.
    /// Blank filter values are ignored.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &TicketFilter,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        let category = non_empty(filter.category.as_deref());
        let priority = non_empty(filter.priority.as_deref());
        let status = non_empty(filter.status.as_deref());
        let search = non_empty(filter.search.as_deref()).map(contains_pattern);

        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if category.is_some() {
            conditions.push(format!("category = ${param_idx}"));
            param_idx += 1;
        }
        if priority.is_some() {
            conditions.push(format!("priority = ${param_idx}"));
            param_idx += 1;
        }
        if status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if search.is_some() {
            conditions.push(format!(
                "(title ILIKE ${param_idx} OR description ILIKE ${param_idx})"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!("SELECT {COLUMNS} FROM tickets {where_clause} {ORDER_BY}");

        let mut q = sqlx::query_as::<_, Ticket>(&query);

        if let Some(c) = category {
            q = q.bind(c);
        }
        if let Some(p) = priority {
            q = q.bind(p);
        }
        if let Some(s) = status {
            q = q.bind(s);
        }
        if let Some(pattern) = search {
            q = q.bind(pattern);
        }

        q.fetch_all(pool).await
    }

    /// Update a ticket. Only non-`None` fields in `input` are applied.
    ///
    /// `created_at` is never modified. Returns `None` if no row with the
    /// given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTicket,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                priority = COALESCE($5, priority),
                status = COALESCE($6, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.priority)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a ticket by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Gather the raw aggregates behind the stats endpoint.
    ///
    /// All three queries run inside one repeatable-read transaction so the
    /// totals and the breakdowns describe the same snapshot.
    pub async fn aggregate(pool: &PgPool) -> Result<TicketAggregates, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let totals = sqlx::query_as::<_, TicketTotals>(
            "SELECT COUNT(*)::BIGINT AS total_tickets, \
                    COUNT(*) FILTER (WHERE status = $1)::BIGINT AS open_tickets, \
                    MIN(created_at) AS first_ticket_at \
             FROM tickets",
        )
        .bind(TicketStatus::Open.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let priority_counts = sqlx::query_as::<_, ValueCount>(
            "SELECT priority AS value, COUNT(*)::BIGINT AS count \
             FROM tickets GROUP BY priority",
        )
        .fetch_all(&mut *tx)
        .await?;

        let category_counts = sqlx::query_as::<_, ValueCount>(
            "SELECT category AS value, COUNT(*)::BIGINT AS count \
             FROM tickets GROUP BY category",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(TicketAggregates {
            total: totals.total_tickets,
            open: totals.open_tickets,
            earliest_created_at: totals.first_ticket_at,
            priority_counts: priority_counts
                .into_iter()
                .map(|row| (row.value, row.count))
                .collect(),
            category_counts: category_counts
                .into_iter()
                .map(|row| (row.value, row.count))
                .collect(),
        })
    }
}
