//! Server configuration module

use clap::Parser;

use inventory_app::config::DatabaseConfig;

use crate::config::{observability::LoggingConfig, server::ServerRuntimeConfig};

pub(crate) mod observability;
pub(crate) mod server;

/// Inventory JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "inventory-json", about = "Sneaker Inventory JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network and lifecycle settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn explicit_arguments_are_applied() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "inventory-json",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--request-timeout-seconds",
            "5",
            "--shutdown-timeout-seconds",
            "15",
            "--log-format",
            "json",
            "--database-url",
            "postgres://localhost/stock",
        ])?;

        assert_eq!(config.socket_addr(), "127.0.0.1:9000");
        assert_eq!(config.server.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.server.shutdown_timeout(), Duration::from_secs(15));
        assert!(matches!(
            config.logging.log_format,
            observability::LogFormat::Json
        ));
        assert_eq!(
            config.database.connect_options()?.get_database(),
            Some("stock")
        );

        Ok(())
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = ServerConfig::try_parse_from(["inventory-json", "--port", "not-a-port"]);

        assert!(result.is_err(), "expected parse failure");
    }
}
