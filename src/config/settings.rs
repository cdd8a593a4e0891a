//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use common::{
    AppError, AppResult, CacheConfig, DatabaseConfig, JwtConfig, RateLimitConfig, ServiceConfig,
};
use domain::MIN_JWT_SECRET_LENGTH;

use super::constants::{DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEV_JWT_SECRET};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServiceConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub jwt: JwtConfig,
    /// Limits for every protected route
    pub rate_limit: RateLimitConfig,
    /// Limits for the login endpoint
    pub auth_rate_limit: RateLimitConfig,
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    ///
    /// # Errors
    /// Fails when `JWT_SECRET` is missing in a release build, shorter than
    /// the minimum length, or a numeric variable does not parse.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };
        Self::check_secret(&jwt_secret)?;

        let database_defaults = DatabaseConfig::default();
        let limit_defaults = RateLimitConfig::default();
        let auth_defaults = RateLimitConfig::auth();

        Ok(Self {
            server: ServiceConfig {
                service_name: env_or("SERVICE_NAME", "ems".to_string())?,
                host: env_or("SERVER_HOST", DEFAULT_SERVER_HOST.to_string())?,
                port: env_or("SERVER_PORT", DEFAULT_SERVER_PORT)?,
                log_level: env_or("LOG_LEVEL", "info".to_string())?,
            },
            database: DatabaseConfig {
                url: env_or("DATABASE_URL", database_defaults.url)?,
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", database_defaults.max_connections)?,
                min_connections: env_or("DATABASE_MIN_CONNECTIONS", database_defaults.min_connections)?,
            },
            cache: CacheConfig {
                url: env_or("REDIS_URL", CacheConfig::default().url)?,
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                expiration_hours: env_or("JWT_EXPIRATION_HOURS", domain::DEFAULT_JWT_EXPIRATION_HOURS)?,
            },
            rate_limit: RateLimitConfig {
                max_requests: env_or("RATE_LIMIT_REQUESTS", limit_defaults.max_requests)?,
                window_seconds: env_or("RATE_LIMIT_WINDOW_SECONDS", limit_defaults.window_seconds)?,
            },
            auth_rate_limit: RateLimitConfig {
                max_requests: env_or("RATE_LIMIT_AUTH_REQUESTS", auth_defaults.max_requests)?,
                window_seconds: env_or("RATE_LIMIT_AUTH_WINDOW_SECONDS", auth_defaults.window_seconds)?,
            },
        })
    }

    /// Configuration for tests and local tooling; never reads the
    /// environment.
    pub fn for_tests() -> Self {
        Self {
            server: ServiceConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            jwt: JwtConfig {
                secret: DEV_JWT_SECRET.to_string(),
                expiration_hours: domain::DEFAULT_JWT_EXPIRATION_HOURS,
            },
            rate_limit: RateLimitConfig::default(),
            auth_rate_limit: RateLimitConfig::auth(),
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt.secret.as_bytes()
    }

    fn check_secret(secret: &str) -> AppResult<()> {
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        Ok(())
    }
}

/// Read and parse `key`, falling back to `default` when unset.
fn env_or<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::internal(format!("{} has an invalid value: {}", key, raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secret_is_rejected() {
        assert!(Config::check_secret("too-short").is_err());
        assert!(Config::check_secret(DEV_JWT_SECRET).is_ok());
    }

    #[test]
    fn missing_variable_uses_default() {
        let port: u16 = env_or("EMS_TEST_SURELY_UNSET_PORT", 4242).unwrap();
        assert_eq!(port, 4242);
    }

    #[test]
    fn test_config_has_usable_secret() {
        let config = Config::for_tests();
        assert!(config.jwt_secret_bytes().len() >= MIN_JWT_SECRET_LENGTH);
        assert_eq!(config.jwt.expiration_hours, 240);
    }
}
