//! Database connection management

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use mockall::automock;
use sqlx::{
    PgPool, Postgres, Transaction,
    migrate::{MigrateError, Migrator},
    postgres::PgPoolOptions,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// How long [`Db::close`] waits for the shutdown signal by default.
pub const CLOSE_TIMEOUT: Duration = Duration::from_secs(60);

/// Schema migrations for the sneakers table.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Error)]
pub enum DatabaseCloseError {
    #[error("shutdown signal not received within {0:?}; pool closed anyway")]
    TimedOut(Duration),
}

/// Owned handle to the shared connection pool.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction on a pooled connection.
    ///
    /// The connection goes back to the pool when the transaction is committed
    /// or dropped.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection can be acquired or `BEGIN` fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Returns the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Wait for `shutdown` or `limit`, whichever comes first, then close the pool.
    ///
    /// The pool is released on both paths.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseCloseError::TimedOut`] when `limit` elapsed before
    /// `shutdown` resolved.
    pub async fn close<F>(&self, shutdown: F, limit: Duration) -> Result<(), DatabaseCloseError>
    where
        F: Future<Output = ()>,
    {
        let signalled = tokio::time::timeout(limit, shutdown).await.is_ok();

        self.pool.close().await;

        if signalled {
            info!("shutdown signalled, connection pool closed");

            Ok(())
        } else {
            warn!(limit_secs = limit.as_secs(), "shutdown wait timed out, connection pool closed");

            Err(DatabaseCloseError::TimedOut(limit))
        }
    }
}

/// Liveness of the storage behind the service.
#[automock]
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    /// Round trip a trivial query through the pool.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl DatabaseHealth for Db {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;

        Ok(())
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the settings are malformed or the connection cannot
/// be established.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.pg_pool_max)
        .connect_with(config.connect_options()?)
        .await
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if any migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
