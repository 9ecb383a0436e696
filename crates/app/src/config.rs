//! Database Config

use clap::Args;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// `PostgreSQL` connection settings.
///
/// `DATABASE_URL` wins when present; otherwise the options are built from the
/// individual `PG_*` settings.
#[derive(Debug, Clone, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string, overrides the `PG_*` settings
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "PG_HOST", default_value = "localhost")]
    pub pg_host: String,

    /// Database port
    #[arg(long, env = "PG_PORT", default_value_t = 5432)]
    pub pg_port: u16,

    /// Database user
    #[arg(long, env = "PG_USER", default_value = "postgres")]
    pub pg_user: String,

    /// Database password
    #[arg(
        long,
        env = "PG_PASSWORD",
        default_value = "password",
        hide_env_values = true
    )]
    pub pg_password: String,

    /// Database name
    #[arg(long, env = "PG_DBNAME", default_value = "database")]
    pub pg_dbname: String,

    /// SSL mode (disable, prefer, require, ...)
    #[arg(long, env = "PG_SSLMODE", default_value = "disable")]
    pub pg_sslmode: String,

    /// Maximum number of pooled connections
    #[arg(long, env = "PG_POOL_MAX", default_value_t = 10)]
    pub pg_pool_max: u32,
}

impl DatabaseConfig {
    /// Connection options for the configured database.
    ///
    /// Parts are passed to the driver unescaped, so passwords may contain any
    /// character.
    ///
    /// # Errors
    ///
    /// Returns an error when `DATABASE_URL` or `PG_SSLMODE` cannot be parsed.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.database_url {
            return url.parse();
        }

        Ok(PgConnectOptions::new()
            .host(&self.pg_host)
            .port(self.pg_port)
            .username(&self.pg_user)
            .password(&self.pg_password)
            .database(&self.pg_dbname)
            .ssl_mode(self.pg_sslmode.parse::<PgSslMode>()?))
    }
}
