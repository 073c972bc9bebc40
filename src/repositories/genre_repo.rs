//! Repository for the `genres` table.

use sqlx::PgExecutor;

use crate::models::genre::{CreateGenre, Genre};
use crate::types::DbId;

pub struct GenreRepo;

impl GenreRepo {
    /// Insert a genre. A duplicate name violates `uq_genres_name`.
    pub async fn create<'e, E>(executor: E, input: &CreateGenre) -> Result<Genre, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Genre>("INSERT INTO genres (name) VALUES ($1) RETURNING id, name")
            .bind(&input.name)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Genre>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn list<'e, E>(executor: E) -> Result<Vec<Genre>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(executor)
            .await
    }

    /// Genres linked to a play, ordered by name.
    pub async fn list_for_play<'e, E>(executor: E, play_id: DbId) -> Result<Vec<Genre>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Genre>(
            "SELECT g.id, g.name
             FROM genres g
             JOIN play_genres pg ON pg.genre_id = g.id
             WHERE pg.play_id = $1
             ORDER BY g.name",
        )
        .bind(play_id)
        .fetch_all(executor)
        .await
    }
}
