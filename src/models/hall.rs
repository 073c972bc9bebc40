//! Theatre hall geometry and capacity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

use crate::types::DbId;

/// Policy limit on rows per hall.
pub const MAX_ROWS: i32 = 100;
/// Policy limit on seats per row.
pub const MAX_SEATS_IN_ROW: i32 = 50;

/// A row from the `theatre_halls` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct TheatreHall {
    pub id: DbId,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
}

impl TheatreHall {
    /// Total bookable seats, `rows * seats_in_row`.
    pub fn capacity(&self) -> i64 {
        i64::from(self.rows) * i64::from(self.seats_in_row)
    }
}

impl fmt::Display for TheatreHall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} rows, {} seats/row)",
            self.name, self.rows, self.seats_in_row
        )
    }
}

/// DTO for creating a hall. Dimensions must be positive and within policy limits.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHall {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 1, max = 100, message = "Rows must be in range (1, 100)."))]
    pub rows: i32,
    #[validate(range(min = 1, max = 50, message = "Seats in row must be in range (1, 50)."))]
    pub seats_in_row: i32,
}

/// DTO for updating a hall. Only provided fields are validated and applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateHall {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 100, message = "Rows must be in range (1, 100)."))]
    pub rows: Option<i32>,
    #[validate(range(min = 1, max = 50, message = "Seats in row must be in range (1, 50)."))]
    pub seats_in_row: Option<i32>,
}
