use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use crate::models::{ticket::Ticket, user::User};
use crate::types::{DbId, Timestamp};

/// A row from the `reservations` table. `created_at` is set by the database
/// on insert and never updated.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Reservation {
    pub id: DbId,
    pub created_at: Timestamp,
    pub user_id: DbId,
}

/// A reservation with its owner and tickets ordered by row, seat.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationDetail {
    pub reservation: Reservation,
    pub user: User,
    pub tickets: Vec<Ticket>,
}

impl fmt::Display for ReservationDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reservation by {} on {}",
            self.user,
            self.reservation.created_at.format("%Y-%m-%d %H:%M")
        )
    }
}
