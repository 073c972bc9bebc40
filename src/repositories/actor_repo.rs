//! Repository for the `actors` table.

use sqlx::PgExecutor;

use crate::models::actor::{Actor, CreateActor};
use crate::types::DbId;

const COLUMNS: &str = "id, first_name, last_name";

pub struct ActorRepo;

impl ActorRepo {
    pub async fn create<'e, E>(executor: E, input: &CreateActor) -> Result<Actor, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO actors (first_name, last_name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Actor>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM actors WHERE id = $1");
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// All actors ordered by last name, then first name.
    pub async fn list<'e, E>(executor: E) -> Result<Vec<Actor>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM actors ORDER BY last_name, first_name, id");
        sqlx::query_as::<_, Actor>(&query).fetch_all(executor).await
    }

    pub async fn list_for_play<'e, E>(executor: E, play_id: DbId) -> Result<Vec<Actor>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Actor>(
            "SELECT a.id, a.first_name, a.last_name
             FROM actors a
             JOIN play_actors pa ON pa.actor_id = a.id
             WHERE pa.play_id = $1
             ORDER BY a.last_name, a.first_name, a.id",
        )
        .bind(play_id)
        .fetch_all(executor)
        .await
    }
}
