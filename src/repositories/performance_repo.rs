//! Repository for the `performances` table and its availability read model.

use sqlx::PgExecutor;

use crate::models::hall::TheatreHall;
use crate::models::performance::{
    CreatePerformance, Performance, PerformanceDetail, PerformanceRow, UpdatePerformance,
};
use crate::types::DbId;

const COLUMNS: &str = "id, play_id, theatre_hall_id, show_time";

/// Performance joined with its play, hall and live ticket count.
const DETAIL_SELECT: &str = "SELECT p.id, p.play_id, p.theatre_hall_id, p.show_time,
        pl.title AS play_title, h.name AS hall_name, h.rows, h.seats_in_row,
        COUNT(t.id) AS tickets_sold
     FROM performances p
     JOIN plays pl ON pl.id = p.play_id
     JOIN theatre_halls h ON h.id = p.theatre_hall_id
     LEFT JOIN tickets t ON t.performance_id = p.id";

const DETAIL_GROUP: &str = "GROUP BY p.id, pl.id, h.id";

pub struct PerformanceRepo;

impl PerformanceRepo {
    pub async fn create<'e, E>(
        executor: E,
        input: &CreatePerformance,
    ) -> Result<Performance, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO performances (play_id, theatre_hall_id, show_time)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Performance>(&query)
            .bind(input.play_id)
            .bind(input.theatre_hall_id)
            .bind(input.show_time)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Performance>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM performances WHERE id = $1");
        sqlx::query_as::<_, Performance>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// The hall a performance is shown in, as currently stored.
    pub async fn find_hall<'e, E>(
        executor: E,
        performance_id: DbId,
    ) -> Result<Option<TheatreHall>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, TheatreHall>(
            "SELECT h.id, h.name, h.rows, h.seats_in_row
             FROM theatre_halls h
             JOIN performances p ON p.theatre_hall_id = h.id
             WHERE p.id = $1",
        )
        .bind(performance_id)
        .fetch_optional(executor)
        .await
    }

    pub async fn find_detail<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<PerformanceDetail>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("{DETAIL_SELECT} WHERE p.id = $1 {DETAIL_GROUP}");
        let row = sqlx::query_as::<_, PerformanceRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row.map(PerformanceDetail::from))
    }

    /// All performances, latest show time first.
    pub async fn list_details<'e, E>(executor: E) -> Result<Vec<PerformanceDetail>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("{DETAIL_SELECT} {DETAIL_GROUP} ORDER BY p.show_time DESC, p.id");
        let rows = sqlx::query_as::<_, PerformanceRow>(&query)
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(PerformanceDetail::from).collect())
    }

    /// Performances in one hall, latest show time first.
    pub async fn list_details_for_hall<'e, E>(
        executor: E,
        hall_id: DbId,
    ) -> Result<Vec<PerformanceDetail>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "{DETAIL_SELECT} WHERE p.theatre_hall_id = $1 {DETAIL_GROUP} \
             ORDER BY p.show_time DESC, p.id"
        );
        let rows = sqlx::query_as::<_, PerformanceRow>(&query)
            .bind(hall_id)
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(PerformanceDetail::from).collect())
    }

    pub async fn update<'e, E>(
        executor: E,
        id: DbId,
        input: &UpdatePerformance,
    ) -> Result<Option<Performance>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE performances SET
                play_id = COALESCE($2, play_id),
                theatre_hall_id = COALESCE($3, theatre_hall_id),
                show_time = COALESCE($4, show_time)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Performance>(&query)
            .bind(id)
            .bind(input.play_id)
            .bind(input.theatre_hall_id)
            .bind(input.show_time)
            .fetch_optional(executor)
            .await
    }

    /// Delete a performance; its tickets cascade.
    pub async fn delete<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM performances WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
