//! Repository for the `reservations` table.

use sqlx::PgExecutor;

use crate::models::reservation::Reservation;
use crate::types::DbId;

const COLUMNS: &str = "id, created_at, user_id";

pub struct ReservationRepo;

impl ReservationRepo {
    /// Insert a reservation for `user_id`; `created_at` comes from the database.
    pub async fn create<'e, E>(executor: E, user_id: DbId) -> Result<Reservation, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("INSERT INTO reservations (user_id) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(user_id)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Reservation>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// A user's reservations, most recent first.
    pub async fn list_for_user<'e, E>(
        executor: E,
        user_id: DbId,
    ) -> Result<Vec<Reservation>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(user_id)
            .fetch_all(executor)
            .await
    }

    /// Delete a reservation; its tickets cascade.
    pub async fn delete<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
