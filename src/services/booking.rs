//! Reservations and tickets.
//!
//! Every ticket write loads the hall of the ticket's performance inside the
//! same transaction and validates the seat against it before the insert or
//! update. Two callers racing for one seat are settled by the
//! `unique_performance_row_seat` constraint: one commits, the other gets
//! `TheatreError::SeatTaken`.

use sqlx::PgConnection;
use tracing::info;
use validator::Validate;

use crate::database::Database;
use crate::error::{TheatreError, TheatreResult};
use crate::models::hall::TheatreHall;
use crate::models::reservation::{Reservation, ReservationDetail};
use crate::models::ticket::{NewTicket, SeatRequest, Ticket, UpdateTicket, ValidTicket};
use crate::models::user::{CreateUser, User};
use crate::repositories::{PerformanceRepo, ReservationRepo, TicketRepo, UserRepo};
use crate::services::{log_creation, warn_if_overbooked};
use crate::types::DbId;

#[derive(Clone)]
pub struct BookingService {
    db: Database,
}

impl BookingService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Store a customer account that reservations can reference.
    pub async fn register_user(&self, input: CreateUser) -> TheatreResult<User> {
        input.validate()?;
        let user = UserRepo::create(&self.db.pool, &input).await?;
        log_creation("User", user.id);
        Ok(user)
    }

    pub async fn find_user_by_email(&self, email: &str) -> TheatreResult<Option<User>> {
        Ok(UserRepo::find_by_email(&self.db.pool, email).await?)
    }

    /// Book `seats` for `user_id` in one reservation.
    ///
    /// Either the reservation and all tickets are stored, or nothing is.
    pub async fn reserve(
        &self,
        user_id: DbId,
        performance_id: DbId,
        seats: Vec<SeatRequest>,
    ) -> TheatreResult<ReservationDetail> {
        if seats.is_empty() {
            return Err(TheatreError::field(
                "tickets",
                "required",
                "At least one seat is required.",
            ));
        }

        let detail = self
            .db
            .atomic(move |conn| {
                Box::pin(async move {
                    let user = UserRepo::find_by_id(&mut *conn, user_id)
                        .await?
                        .ok_or(TheatreError::not_found("User", user_id))?;
                    let hall = performance_hall(conn, performance_id).await?;

                    let reservation = ReservationRepo::create(&mut *conn, user_id).await?;
                    let mut tickets = Vec::with_capacity(seats.len());
                    for seat in &seats {
                        let valid = NewTicket {
                            row: seat.row,
                            seat: seat.seat,
                            performance_id,
                            reservation_id: reservation.id,
                        }
                        .validate_for(&hall)?;
                        tickets.push(TicketRepo::create(&mut *conn, &valid).await?);
                    }
                    tickets.sort_by_key(|t| (t.row, t.seat));

                    Ok::<_, TheatreError>(ReservationDetail {
                        reservation,
                        user,
                        tickets,
                    })
                })
            })
            .await?;

        log_creation("Reservation", detail.reservation.id);
        info!(
            reservation_id = detail.reservation.id,
            performance_id,
            tickets = detail.tickets.len(),
            "Seats booked"
        );
        Ok(detail)
    }

    /// Add one more ticket to an existing reservation.
    pub async fn add_ticket(
        &self,
        reservation_id: DbId,
        performance_id: DbId,
        seat: SeatRequest,
    ) -> TheatreResult<Ticket> {
        let ticket = self
            .db
            .atomic(move |conn| {
                Box::pin(async move {
                    if ReservationRepo::find_by_id(&mut *conn, reservation_id)
                        .await?
                        .is_none()
                    {
                        return Err(TheatreError::not_found("Reservation", reservation_id));
                    }
                    let valid = validated(
                        conn,
                        NewTicket {
                            row: seat.row,
                            seat: seat.seat,
                            performance_id,
                            reservation_id,
                        },
                    )
                    .await?;
                    Ok::<_, TheatreError>(TicketRepo::create(&mut *conn, &valid).await?)
                })
            })
            .await?;
        log_creation("Ticket", ticket.id);
        Ok(ticket)
    }

    /// Change a ticket's seat or performance. The merged ticket is validated
    /// against the current hall of its (possibly new) performance.
    pub async fn update_ticket(&self, ticket_id: DbId, update: UpdateTicket) -> TheatreResult<Ticket> {
        self.db
            .atomic(move |conn| {
                Box::pin(async move {
                    let stored = TicketRepo::find_by_id(&mut *conn, ticket_id)
                        .await?
                        .ok_or(TheatreError::not_found("Ticket", ticket_id))?;
                    let valid = validated(conn, stored.merged(&update)).await?;
                    TicketRepo::update(&mut *conn, ticket_id, &valid)
                        .await?
                        .ok_or(TheatreError::not_found("Ticket", ticket_id))
                })
            })
            .await
    }

    pub async fn get_ticket(&self, ticket_id: DbId) -> TheatreResult<Ticket> {
        TicketRepo::find_by_id(&self.db.pool, ticket_id)
            .await?
            .ok_or(TheatreError::not_found("Ticket", ticket_id))
    }

    pub async fn get_reservation(&self, id: DbId) -> TheatreResult<ReservationDetail> {
        let reservation = ReservationRepo::find_by_id(&self.db.pool, id)
            .await?
            .ok_or(TheatreError::not_found("Reservation", id))?;
        let user = UserRepo::find_by_id(&self.db.pool, reservation.user_id)
            .await?
            .ok_or(TheatreError::not_found("User", reservation.user_id))?;
        let tickets = TicketRepo::list_for_reservation(&self.db.pool, id).await?;
        Ok(ReservationDetail {
            reservation,
            user,
            tickets,
        })
    }

    /// A user's reservations, most recent first.
    pub async fn list_user_reservations(&self, user_id: DbId) -> TheatreResult<Vec<Reservation>> {
        Ok(ReservationRepo::list_for_user(&self.db.pool, user_id).await?)
    }

    /// Delete a reservation and release its seats. Returns the number of
    /// tickets released.
    pub async fn cancel_reservation(&self, id: DbId) -> TheatreResult<usize> {
        let released = self
            .db
            .atomic(move |conn| {
                Box::pin(async move {
                    let tickets = TicketRepo::list_for_reservation(&mut *conn, id).await?;
                    if !ReservationRepo::delete(&mut *conn, id).await? {
                        return Err(TheatreError::not_found("Reservation", id));
                    }
                    Ok::<_, TheatreError>(tickets.len())
                })
            })
            .await?;
        info!(reservation_id = id, released, "Reservation cancelled");
        Ok(released)
    }

    /// Seats already sold for a performance, ordered by row, seat.
    pub async fn taken_seats(&self, performance_id: DbId) -> TheatreResult<Vec<SeatRequest>> {
        let seats = TicketRepo::taken_seats(&self.db.pool, performance_id).await?;
        Ok(seats
            .into_iter()
            .map(|(row, seat)| SeatRequest { row, seat })
            .collect())
    }

    /// Seats still for sale; may be negative, see
    /// [`crate::models::performance::available_tickets`].
    pub async fn available_tickets(&self, performance_id: DbId) -> TheatreResult<i64> {
        let detail = PerformanceRepo::find_detail(&self.db.pool, performance_id)
            .await?
            .ok_or(TheatreError::not_found("Performance", performance_id))?;
        warn_if_overbooked(&detail);
        Ok(detail.available_tickets())
    }
}

async fn performance_hall(conn: &mut PgConnection, performance_id: DbId) -> TheatreResult<TheatreHall> {
    PerformanceRepo::find_hall(conn, performance_id)
        .await?
        .ok_or(TheatreError::not_found("Performance", performance_id))
}

async fn validated(conn: &mut PgConnection, ticket: NewTicket) -> TheatreResult<ValidTicket> {
    let hall = performance_hall(conn, ticket.performance_id).await?;
    Ok(ticket.validate_for(&hall)?)
}
