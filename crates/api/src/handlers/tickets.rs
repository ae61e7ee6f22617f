//! Handlers for the `/tickets` resource.
//!
//! Listing accepts optional `category`, `priority`, `status` and `search`
//! filters and never rejects them; unknown values simply match nothing.
//! Mutations validate every supplied field against the ticket enumerations.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ticketdesk_core::error::CoreError;
use ticketdesk_core::stats::TicketStats;
use ticketdesk_core::ticket;
use ticketdesk_core::types::DbId;
use ticketdesk_db::models::ticket::{
    CreateTicket, ReplaceTicket, Ticket, TicketFilter, UpdateTicket,
};
use ticketdesk_db::repositories::TicketRepo;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Ticket",
        id,
    })
}

/// Validate the fields of a new ticket.
fn validate_create(input: &CreateTicket) -> Result<(), CoreError> {
    ticket::validate_title(&input.title)?;
    ticket::validate_description(&input.description)?;
    ticket::validate_category(&input.category)?;
    ticket::validate_priority(&input.priority)?;
    if let Some(ref s) = input.status {
        ticket::validate_status(s)?;
    }
    Ok(())
}

/// Validate whichever fields an update supplies.
fn validate_update(input: &UpdateTicket) -> Result<(), CoreError> {
    if let Some(ref t) = input.title {
        ticket::validate_title(t)?;
    }
    if let Some(ref d) = input.description {
        ticket::validate_description(d)?;
    }
    if let Some(ref c) = input.category {
        ticket::validate_category(c)?;
    }
    if let Some(ref p) = input.priority {
        ticket::validate_priority(p)?;
    }
    if let Some(ref s) = input.status {
        ticket::validate_status(s)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /tickets
// ---------------------------------------------------------------------------

/// GET /api/v1/tickets
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<TicketFilter>,
) -> AppResult<Json<Vec<Ticket>>> {
    let tickets = TicketRepo::list_filtered(&state.pool, &filter).await?;
    Ok(Json(tickets))
}

// ---------------------------------------------------------------------------
// POST /tickets
// ---------------------------------------------------------------------------

/// POST /api/v1/tickets
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateTicket>,
) -> AppResult<(StatusCode, Json<Ticket>)> {
    validate_create(&input)?;

    let created = TicketRepo::create(&state.pool, &input).await?;

    tracing::info!(
        ticket_id = created.id,
        category = %created.category,
        priority = %created.priority,
        "Ticket created",
    );

    Ok((StatusCode::CREATED, Json(created)))
}

// ---------------------------------------------------------------------------
// GET /tickets/{id}
// ---------------------------------------------------------------------------

/// GET /api/v1/tickets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ticket>> {
    let found = TicketRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(found))
}

// ---------------------------------------------------------------------------
// PUT / PATCH /tickets/{id}
// ---------------------------------------------------------------------------

/// PUT /api/v1/tickets/{id}
///
/// Replaces every editable field. An omitted `status` keeps the current one.
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<ReplaceTicket>,
) -> AppResult<Json<Ticket>> {
    apply_update(&state, id, UpdateTicket::from(input)).await
}

/// PATCH /api/v1/tickets/{id}
///
/// Applies only the supplied fields, e.g. `{"status": "resolved"}`.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateTicket>,
) -> AppResult<Json<Ticket>> {
    apply_update(&state, id, input).await
}

async fn apply_update(state: &AppState, id: DbId, input: UpdateTicket) -> AppResult<Json<Ticket>> {
    validate_update(&input)?;

    let updated = TicketRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(ticket_id = id, status = %updated.status, "Ticket updated");

    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// DELETE /tickets/{id}
// ---------------------------------------------------------------------------

/// DELETE /api/v1/tickets/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if TicketRepo::delete(&state.pool, id).await? {
        tracing::info!(ticket_id = id, "Ticket deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// GET /tickets/stats
// ---------------------------------------------------------------------------

/// GET /api/v1/tickets/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<TicketStats>> {
    let aggregates = TicketRepo::aggregate(&state.pool).await?;
    Ok(Json(TicketStats::from_aggregates(
        &aggregates,
        chrono::Utc::now(),
    )))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
