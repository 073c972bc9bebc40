use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::types::DbId;

/// Name of the unique constraint on `tickets (performance_id, row, seat)`.
pub const SEAT_CONSTRAINT: &str = "unique_performance_row_seat";

/// Error type shared by repositories and services.
///
/// Database errors are classified on conversion: a clash on
/// [`SEAT_CONSTRAINT`] becomes [`TheatreError::SeatTaken`], other unique
/// violations become [`TheatreError::Conflict`], foreign key violations become
/// [`TheatreError::InvalidReference`], everything else stays a
/// [`TheatreError::Database`].
#[derive(Debug, thiserror::Error)]
pub enum TheatreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Seat is already taken for this performance")]
    SeatTaken,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

pub type TheatreResult<T> = Result<T, TheatreError>;

impl TheatreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        TheatreError::NotFound { entity, id }
    }

    /// Build a single-field validation error with a human-readable message.
    pub fn field(field: &'static str, code: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, ValidationError::new(code).with_message(message.into()));
        TheatreError::Validation(errors)
    }

    /// True when the seat the caller asked for is already sold.
    pub fn is_seat_taken(&self) -> bool {
        matches!(self, TheatreError::SeatTaken)
    }
}

impl From<sqlx::Error> for TheatreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if db_err.is_unique_violation() {
                let message = match constraint {
                    SEAT_CONSTRAINT => return TheatreError::SeatTaken,
                    "uq_genres_name" => "Genre with this name already exists".to_string(),
                    "uq_users_email" => "User with this email already exists".to_string(),
                    other => format!("Duplicate value violates unique constraint: {other}"),
                };
                return TheatreError::Conflict(message);
            }
            if db_err.is_foreign_key_violation() {
                return TheatreError::InvalidReference(format!(
                    "Referenced row does not exist ({constraint})"
                ));
            }
        }
        TheatreError::Database(err)
    }
}
