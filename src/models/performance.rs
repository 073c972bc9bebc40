//! Performances and seat availability.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use crate::models::hall::TheatreHall;
use crate::types::{DbId, Timestamp};

/// A row from the `performances` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Performance {
    pub id: DbId,
    pub play_id: DbId,
    pub theatre_hall_id: DbId,
    pub show_time: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePerformance {
    pub play_id: DbId,
    pub theatre_hall_id: DbId,
    pub show_time: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePerformance {
    pub play_id: Option<DbId>,
    pub theatre_hall_id: Option<DbId>,
    pub show_time: Option<Timestamp>,
}

/// Seats left for sale: hall capacity minus tickets sold.
///
/// Not clamped at zero. A negative result means more tickets exist than the
/// hall currently has seats, e.g. after the hall was shrunk.
pub fn available_tickets(hall: &TheatreHall, tickets_sold: i64) -> i64 {
    hall.capacity() - tickets_sold
}

/// Row shape of the performance read-model query.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct PerformanceRow {
    pub id: DbId,
    pub play_id: DbId,
    pub theatre_hall_id: DbId,
    pub show_time: Timestamp,
    pub play_title: String,
    pub hall_name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub tickets_sold: i64,
}

/// A performance with its play title, hall and sold-ticket count.
///
/// Capacity and availability are derived on every call.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceDetail {
    pub performance: Performance,
    pub play_title: String,
    pub hall: TheatreHall,
    pub tickets_sold: i64,
}

impl PerformanceDetail {
    pub fn capacity(&self) -> i64 {
        self.hall.capacity()
    }

    pub fn available_tickets(&self) -> i64 {
        available_tickets(&self.hall, self.tickets_sold)
    }

    pub fn is_overbooked(&self) -> bool {
        self.available_tickets() < 0
    }
}

impl From<PerformanceRow> for PerformanceDetail {
    fn from(row: PerformanceRow) -> Self {
        PerformanceDetail {
            performance: Performance {
                id: row.id,
                play_id: row.play_id,
                theatre_hall_id: row.theatre_hall_id,
                show_time: row.show_time,
            },
            play_title: row.play_title,
            hall: TheatreHall {
                id: row.theatre_hall_id,
                name: row.hall_name,
                rows: row.rows,
                seats_in_row: row.seats_in_row,
            },
            tickets_sold: row.tickets_sold,
        }
    }
}

impl fmt::Display for PerformanceDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {} ({})",
            self.play_title,
            self.hall.name,
            self.performance.show_time.format("%Y-%m-%d %H:%M")
        )
    }
}
