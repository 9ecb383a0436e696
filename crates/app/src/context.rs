//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    config::DatabaseConfig,
    database::{self, DatabaseHealth, Db},
    domain::sneakers::{PgSneakersService, SneakersService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    /// Pool handle kept for shutdown.
    pub db: Db,
    pub sneakers: Arc<dyn SneakersService>,
    pub health: Arc<dyn DatabaseHealth>,
}

impl AppContext {
    /// Build application context from database settings.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(config)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool)))
    }

    #[must_use]
    pub fn from_db(db: Db) -> Self {
        Self {
            sneakers: Arc::new(PgSneakersService::new(db.clone())),
            health: Arc::new(db.clone()),
            db,
        }
    }
}
