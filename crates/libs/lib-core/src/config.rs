//! # Application Configuration
//!
//! Configuration loaded once from environment variables at startup and then
//! passed by value into the router state. Every required variable is checked
//! up front so a misconfigured process fails before it binds a socket.
//!
//! | Variable | Required | Meaning |
//! |---|---|---|
//! | `PORT` | yes | listen port |
//! | `DATABASE_URL` | yes | SQLite connection URL |
//! | `JWT_SECRET` | yes | session token signing secret (>= 32 chars) |
//! | `APP_ENV` | yes | `development` or `production` |
//! | `FRONTEND_URL` | yes | allowed CORS origin |
//! | `TOKEN_TTL_MINUTES` | no (15) | session lifetime |
//!
//! `LOG_LEVEL` is read separately by the server before configuration loads, so
//! configuration failures are themselves logged.

use crate::error::{AppError, Result};
use lib_auth::DEFAULT_TOKEN_TTL_MINUTES;
use lib_utils::envs::{get_env, get_env_parse, get_env_parse_or};
use std::fmt;
use std::str::FromStr;

/// Deployment mode. Controls the session cookie attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvMode {
    /// Local development: cookie is not `Secure` and uses `SameSite=Lax`.
    Development,
    /// Anything deployed: cookie is `Secure` and `SameSite=None` for cross-site use.
    Production,
}

impl EnvMode {
    pub fn is_development(self) -> bool {
        matches!(self, EnvMode::Development)
    }
}

impl FromStr for EnvMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(EnvMode::Development),
            "production" | "prod" => Ok(EnvMode::Production),
            _ => Err(format!("Invalid environment mode: {}", s)),
        }
    }
}

impl fmt::Display for EnvMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvMode::Development => write!(f, "development"),
            EnvMode::Production => write!(f, "production"),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Port the HTTP server listens on
    pub port: u16,

    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for session token signing and verification
    ///
    /// **Must be at least 32 characters long**.
    pub jwt_secret: String,

    /// Session token and cookie lifetime in minutes
    pub token_ttl_minutes: i64,

    /// Deployment mode
    pub env_mode: EnvMode,

    /// Single origin allowed to make credentialed cross-origin requests
    pub frontend_url: String,
}

// `jwt_secret` is never printed.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"[redacted]")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("env_mode", &self.env_mode)
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = get_env_parse::<u16>("PORT").map_err(config_err)?;
        let database_url = get_env("DATABASE_URL").map_err(config_err)?;
        let jwt_secret = get_env("JWT_SECRET").map_err(config_err)?;
        let env_mode = get_env("APP_ENV")
            .map_err(config_err)?
            .parse::<EnvMode>()
            .map_err(AppError::Config)?;
        let frontend_url = get_env("FRONTEND_URL").map_err(config_err)?;
        let token_ttl_minutes =
            get_env_parse_or("TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES).map_err(config_err)?;

        Ok(Self {
            port,
            database_url,
            jwt_secret,
            token_ttl_minutes,
            env_mode,
            frontend_url,
        })
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < 32 {
            return Err(AppError::Config(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }

        if !(1..=1440).contains(&self.token_ttl_minutes) {
            return Err(AppError::Config(
                "TOKEN_TTL_MINUTES must be between 1 and 1440".to_string(),
            ));
        }

        if !(self.frontend_url.starts_with("http://") || self.frontend_url.starts_with("https://")) {
            return Err(AppError::Config(
                "FRONTEND_URL must be an http(s) origin".to_string(),
            ));
        }

        if self.port == 0 {
            return Err(AppError::Config("PORT must not be 0".to_string()));
        }

        Ok(())
    }

    /// Load and validate in one step.
    pub fn load() -> Result<Self> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Session lifetime as a chrono duration.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.token_ttl_minutes)
    }
}

fn config_err(err: lib_utils::envs::Error) -> AppError {
    AppError::Config(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            port: 8000,
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
            token_ttl_minutes: 15,
            env_mode: EnvMode::Development,
            frontend_url: "http://localhost:5173".to_string(),
        }
    }

    #[test]
    fn test_env_mode_parsing() {
        assert_eq!("Development".parse::<EnvMode>(), Ok(EnvMode::Development));
        assert_eq!(" production ".parse::<EnvMode>(), Ok(EnvMode::Production));
        assert!("staging".parse::<EnvMode>().is_err());
        assert!(EnvMode::Development.is_development());
        assert!(!EnvMode::Production.is_development());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let config = valid_config();

        assert!(config.validate().is_ok());
        assert_eq!(config.token_ttl(), chrono::Duration::minutes(15));
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let config = Config {
            jwt_secret: "too-short".to_string(),
            ..valid_config()
        };

        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_non_http_origin() {
        let config = Config {
            frontend_url: "localhost:5173".to_string(),
            ..valid_config()
        };

        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_ttl_out_of_range() {
        for ttl in [0, -5, 1441] {
            let config = Config {
                token_ttl_minutes: ttl,
                ..valid_config()
            };
            assert!(matches!(config.validate(), Err(AppError::Config(_))));
        }
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = valid_config();

        let rendered = format!("{:?}", config);

        assert!(!rendered.contains(&config.jwt_secret));
        assert!(rendered.contains("[redacted]"));
        assert!(rendered.contains("8000"));
    }
}
