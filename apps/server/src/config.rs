//! Server configuration.

use std::env;
use std::fmt;

/// Storage backend selection, made once at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-memory map store; data does not survive a restart.
    Memory,
    /// SQLite store at `database_url`.
    Sqlite,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Storage backend.
    pub backend: StoreBackend,
    /// Database URL (used by the sqlite backend only).
    pub database_url: String,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let backend = match env::var("DAYPACK_STORE").as_deref() {
            Ok("memory") | Err(_) => StoreBackend::Memory,
            Ok("sqlite") => StoreBackend::Sqlite,
            Ok(other) => anyhow::bail!("DAYPACK_STORE must be 'memory' or 'sqlite', got {other:?}"),
        };

        Ok(Self {
            host: env::var("DAYPACK_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("DAYPACK_SERVER_PORT")
                .unwrap_or_else(|_| "5871".to_string())
                .parse()
                .unwrap_or(5871),
            backend,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:daypack.db?mode=rwc".to_string()),
            log_level: env::var("DAYPACK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the cases share process environment state.
    #[test]
    fn test_backend_selection() {
        env::remove_var("DAYPACK_STORE");
        env::remove_var("DAYPACK_SERVER_HOST");
        env::remove_var("DAYPACK_SERVER_PORT");

        let config = Config::from_env().unwrap();
        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.server_addr(), "0.0.0.0:5871");

        env::set_var("DAYPACK_STORE", "sqlite");
        let config = Config::from_env().unwrap();
        assert_eq!(config.backend, StoreBackend::Sqlite);

        env::set_var("DAYPACK_STORE", "parquet");
        assert!(Config::from_env().is_err());

        env::remove_var("DAYPACK_STORE");
    }
}
