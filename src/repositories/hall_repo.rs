//! Repository for the `theatre_halls` table.

use sqlx::PgExecutor;

use crate::models::hall::{CreateHall, TheatreHall, UpdateHall};
use crate::types::DbId;

const COLUMNS: &str = "id, name, rows, seats_in_row";

pub struct HallRepo;

impl HallRepo {
    /// Insert a hall. Callers validate the DTO first.
    pub async fn create<'e, E>(executor: E, input: &CreateHall) -> Result<TheatreHall, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO theatre_halls (name, rows, seats_in_row)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TheatreHall>(&query)
            .bind(&input.name)
            .bind(input.rows)
            .bind(input.seats_in_row)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<TheatreHall>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM theatre_halls WHERE id = $1");
        sqlx::query_as::<_, TheatreHall>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// All halls ordered by name.
    pub async fn list<'e, E>(executor: E) -> Result<Vec<TheatreHall>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM theatre_halls ORDER BY name, id");
        sqlx::query_as::<_, TheatreHall>(&query)
            .fetch_all(executor)
            .await
    }

    /// Update a hall. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e, E>(
        executor: E,
        id: DbId,
        input: &UpdateHall,
    ) -> Result<Option<TheatreHall>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE theatre_halls SET
                name = COALESCE($2, name),
                rows = COALESCE($3, rows),
                seats_in_row = COALESCE($4, seats_in_row)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TheatreHall>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.rows)
            .bind(input.seats_in_row)
            .fetch_optional(executor)
            .await
    }

    /// Number of performances and tickets that deleting the hall would remove.
    pub async fn count_dependents<'e, E>(executor: E, id: DbId) -> Result<(i64, i64), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(DISTINCT p.id), COUNT(t.id)
             FROM performances p
             LEFT JOIN tickets t ON t.performance_id = p.id
             WHERE p.theatre_hall_id = $1",
        )
        .bind(id)
        .fetch_one(executor)
        .await
    }

    /// Delete a hall; its performances and their tickets cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM theatre_halls WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
