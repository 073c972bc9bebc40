//! Tickets and the seat-range rule.
//!
//! A ticket can only reach the database as a [`ValidTicket`], and the only
//! way to get one is [`NewTicket::validate_for`] against the hall the
//! performance is shown in. Inserts and updates both go through it.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::{ValidationError, ValidationErrors};

use crate::models::hall::TheatreHall;
use crate::types::DbId;

/// A row from the `tickets` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Ticket {
    pub id: DbId,
    pub row: i32,
    pub seat: i32,
    pub performance_id: DbId,
    pub reservation_id: DbId,
}

impl Ticket {
    /// `"<performance> (row: r, seat: s)"`.
    pub fn label(&self, performance: &impl fmt::Display) -> String {
        format!("{performance} (row: {}, seat: {})", self.row, self.seat)
    }
}

/// A seat a caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeatRequest {
    pub row: i32,
    pub seat: i32,
}

/// Unvalidated ticket contents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTicket {
    pub row: i32,
    pub seat: i32,
    pub performance_id: DbId,
    pub reservation_id: DbId,
}

/// Patch for an existing ticket. Moving it to another performance is allowed;
/// the merged result is validated against that performance's hall.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTicket {
    pub row: Option<i32>,
    pub seat: Option<i32>,
    pub performance_id: Option<DbId>,
}

impl NewTicket {
    /// Check the seat against `hall` and seal the result.
    pub fn validate_for(self, hall: &TheatreHall) -> Result<ValidTicket, ValidationErrors> {
        validate_seat(self.row, self.seat, hall)?;
        Ok(ValidTicket(self))
    }
}

impl Ticket {
    /// Apply `update` on top of the stored values.
    pub fn merged(&self, update: &UpdateTicket) -> NewTicket {
        NewTicket {
            row: update.row.unwrap_or(self.row),
            seat: update.seat.unwrap_or(self.seat),
            performance_id: update.performance_id.unwrap_or(self.performance_id),
            reservation_id: self.reservation_id,
        }
    }
}

/// A ticket whose row and seat are known to fit its hall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTicket(NewTicket);

impl ValidTicket {
    pub fn row(&self) -> i32 {
        self.0.row
    }

    pub fn seat(&self) -> i32 {
        self.0.seat
    }

    pub fn performance_id(&self) -> DbId {
        self.0.performance_id
    }

    pub fn reservation_id(&self) -> DbId {
        self.0.reservation_id
    }
}

/// Check `row` and `seat` against the hall geometry, reporting every field
/// that is out of range.
pub fn validate_seat(row: i32, seat: i32, hall: &TheatreHall) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Some(err) = check_range(row, hall.rows, "Row") {
        errors.add("row", err);
    }
    if let Some(err) = check_range(seat, hall.seats_in_row, "Seat") {
        errors.add("seat", err);
    }

    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_range(value: i32, max_value: i32, label: &str) -> Option<ValidationError> {
    if (1..=max_value).contains(&value) {
        return None;
    }
    let mut err = ValidationError::new("range").with_message(
        format!("{label} number must be in range (1, {max_value}).").into(),
    );
    err.add_param("min".into(), &1);
    err.add_param("max".into(), &max_value);
    err.add_param("value".into(), &value);
    Some(err)
}
