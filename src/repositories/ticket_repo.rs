//! Repository for the `tickets` table.
//!
//! Writes only accept a [`ValidTicket`]; the `(performance_id, row, seat)`
//! uniqueness is left to the `unique_performance_row_seat` constraint.

use sqlx::PgExecutor;

use crate::models::ticket::{Ticket, ValidTicket};
use crate::types::DbId;

const COLUMNS: &str = "id, row, seat, performance_id, reservation_id";

pub struct TicketRepo;

impl TicketRepo {
    pub async fn create<'e, E>(executor: E, ticket: &ValidTicket) -> Result<Ticket, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO tickets (row, seat, performance_id, reservation_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(ticket.row())
            .bind(ticket.seat())
            .bind(ticket.performance_id())
            .bind(ticket.reservation_id())
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Ticket>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Overwrite a ticket's seat and performance with re-validated values.
    pub async fn update<'e, E>(
        executor: E,
        id: DbId,
        ticket: &ValidTicket,
    ) -> Result<Option<Ticket>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE tickets SET row = $2, seat = $3, performance_id = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(ticket.row())
            .bind(ticket.seat())
            .bind(ticket.performance_id())
            .fetch_optional(executor)
            .await
    }

    /// Tickets of a reservation ordered by row, seat.
    pub async fn list_for_reservation<'e, E>(
        executor: E,
        reservation_id: DbId,
    ) -> Result<Vec<Ticket>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM tickets WHERE reservation_id = $1 ORDER BY row, seat, id"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(reservation_id)
            .fetch_all(executor)
            .await
    }

    /// Sold `(row, seat)` pairs for a performance, ordered.
    pub async fn taken_seats<'e, E>(
        executor: E,
        performance_id: DbId,
    ) -> Result<Vec<(i32, i32)>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, (i32, i32)>(
            "SELECT row, seat FROM tickets WHERE performance_id = $1 ORDER BY row, seat",
        )
        .bind(performance_id)
        .fetch_all(executor)
        .await
    }

    pub async fn count_for_performance<'e, E>(
        executor: E,
        performance_id: DbId,
    ) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tickets WHERE performance_id = $1")
            .bind(performance_id)
            .fetch_one(executor)
            .await
    }
}
