use futures::future::BoxFuture;
use sqlx::{postgres::PgPoolOptions, PgConnection, Pool, Postgres};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::error::TheatreError;

#[derive(Clone)]
pub struct Database {
    pub pool: Pool<Postgres>,
}

impl Database {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;

        Ok(Database { pool })
    }

    /// Wrap an already configured pool, e.g. the one `#[sqlx::test]` hands out.
    pub fn from_pool(pool: Pool<Postgres>) -> Self {
        Database { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("./src/migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed");
        Ok(())
    }

    /// Run `op` inside a single transaction.
    ///
    /// Commits when `op` returns `Ok`. On `Err` the transaction is rolled back
    /// and the error is returned unchanged; a failing rollback is only logged.
    ///
    /// ```ignore
    /// let hall = db
    ///     .atomic(move |conn| Box::pin(async move { HallRepo::create(conn, &input).await }))
    ///     .await?;
    /// ```
    pub async fn atomic<T, F>(&self, op: F) -> Result<T, TheatreError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, TheatreError>> + Send,
    {
        let mut tx = self.pool.begin().await?;

        match op(&mut *tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "rollback failed after: {}", err);
                }
                Err(err)
            }
        }
    }
}
