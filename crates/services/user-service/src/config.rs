//! User service configuration.

use std::env;

use common::{DatabaseConfig, ServiceConfig};
use domain::WorkFactor;

use crate::repository::UuidColumn;

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Service name and log level
    pub service: ServiceConfig,
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Storage type of the `users.uuid` column
    pub uuid_column: UuidColumn,
    /// Argon2 cost used when setting passwords
    pub work_factor: WorkFactor,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                log_level: env::var("USER_SERVICE_LOG_LEVEL")
                    .unwrap_or(defaults.service.log_level),
            },
            database: DatabaseConfig {
                url: env::var("USER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: env_parse("USER_SERVICE_DB_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
                min_connections: env_parse("USER_SERVICE_DB_MIN_CONNECTIONS")
                    .unwrap_or(defaults.database.min_connections),
            },
            uuid_column: env_parse("USER_SERVICE_UUID_COLUMN")
                .unwrap_or(defaults.uuid_column),
            work_factor: WorkFactor {
                memory_kib: env_parse("USER_SERVICE_HASH_MEMORY_KIB")
                    .unwrap_or(defaults.work_factor.memory_kib),
                iterations: env_parse("USER_SERVICE_HASH_ITERATIONS")
                    .unwrap_or(defaults.work_factor.iterations),
                parallelism: env_parse("USER_SERVICE_HASH_PARALLELISM")
                    .unwrap_or(defaults.work_factor.parallelism),
            },
        }
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                log_level: "info".to_string(),
            },
            database: DatabaseConfig::default(),
            uuid_column: UuidColumn::Text,
            work_factor: WorkFactor::default(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UserServiceConfig::default();
        assert_eq!(config.service.service_name, "user-service");
        assert_eq!(config.work_factor, WorkFactor::default());
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.uuid_column, UuidColumn::Text);
    }

    #[test]
    fn test_env_parse_ignores_garbage() {
        env::set_var("USER_SERVICE_TEST_GARBAGE_NUMBER", "lots");
        assert_eq!(env_parse::<u32>("USER_SERVICE_TEST_GARBAGE_NUMBER"), None);
        env::set_var("USER_SERVICE_TEST_GOOD_NUMBER", "42");
        assert_eq!(env_parse::<u32>("USER_SERVICE_TEST_GOOD_NUMBER"), Some(42));
    }
}
