//! Repository for `plays` and the `play_genres` / `play_actors` join tables.

use sqlx::{PgConnection, PgExecutor};

use crate::models::play::{CreatePlay, Play, UpdatePlay};
use crate::types::DbId;

const COLUMNS: &str = "id, title, description, cover_image";

pub struct PlayRepo;

impl PlayRepo {
    /// Insert the play row only; links are written with [`Self::set_genres`]
    /// and [`Self::set_actors`].
    pub async fn create<'e, E>(executor: E, input: &CreatePlay) -> Result<Play, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO plays (title, description) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Play>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Play>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM plays WHERE id = $1");
        sqlx::query_as::<_, Play>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// All plays ordered by title.
    pub async fn list<'e, E>(executor: E) -> Result<Vec<Play>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM plays ORDER BY title, id");
        sqlx::query_as::<_, Play>(&query).fetch_all(executor).await
    }

    pub async fn list_by_genre<'e, E>(executor: E, genre_id: DbId) -> Result<Vec<Play>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Play>(
            "SELECT p.id, p.title, p.description, p.cover_image
             FROM plays p
             JOIN play_genres pg ON pg.play_id = p.id
             WHERE pg.genre_id = $1
             ORDER BY p.title, p.id",
        )
        .bind(genre_id)
        .fetch_all(executor)
        .await
    }

    pub async fn list_by_actor<'e, E>(executor: E, actor_id: DbId) -> Result<Vec<Play>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Play>(
            "SELECT p.id, p.title, p.description, p.cover_image
             FROM plays p
             JOIN play_actors pa ON pa.play_id = p.id
             WHERE pa.actor_id = $1
             ORDER BY p.title, p.id",
        )
        .bind(actor_id)
        .fetch_all(executor)
        .await
    }

    /// Update scalar fields. Link sets are handled separately.
    pub async fn update<'e, E>(
        executor: E,
        id: DbId,
        input: &UpdatePlay,
    ) -> Result<Option<Play>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE plays SET
                title = COALESCE($2, title),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Play>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(executor)
            .await
    }

    pub async fn set_cover_image<'e, E>(
        executor: E,
        id: DbId,
        path: &str,
    ) -> Result<Option<Play>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("UPDATE plays SET cover_image = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Play>(&query)
            .bind(id)
            .bind(path)
            .fetch_optional(executor)
            .await
    }

    /// Replace the play's genre links with `genre_ids`. Duplicates are ignored.
    pub async fn set_genres(
        conn: &mut PgConnection,
        play_id: DbId,
        genre_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM play_genres WHERE play_id = $1")
            .bind(play_id)
            .execute(&mut *conn)
            .await?;

        if !genre_ids.is_empty() {
            sqlx::query(
                "INSERT INTO play_genres (play_id, genre_id)
                 SELECT $1::BIGINT, UNNEST($2::BIGINT[])
                 ON CONFLICT DO NOTHING",
            )
            .bind(play_id)
            .bind(genre_ids)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Replace the play's actor links with `actor_ids`. Duplicates are ignored.
    pub async fn set_actors(
        conn: &mut PgConnection,
        play_id: DbId,
        actor_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM play_actors WHERE play_id = $1")
            .bind(play_id)
            .execute(&mut *conn)
            .await?;

        if !actor_ids.is_empty() {
            sqlx::query(
                "INSERT INTO play_actors (play_id, actor_id)
                 SELECT $1::BIGINT, UNNEST($2::BIGINT[])
                 ON CONFLICT DO NOTHING",
            )
            .bind(play_id)
            .bind(actor_ids)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Number of performances and tickets that deleting the play would remove.
    pub async fn count_dependents<'e, E>(executor: E, id: DbId) -> Result<(i64, i64), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(DISTINCT p.id), COUNT(t.id)
             FROM performances p
             LEFT JOIN tickets t ON t.performance_id = p.id
             WHERE p.play_id = $1",
        )
        .bind(id)
        .fetch_one(executor)
        .await
    }

    /// Delete a play; links, performances and tickets cascade.
    pub async fn delete<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM plays WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
