//! Application configuration loaded from the environment.
//!
//! Three sections, each with defaults: `app`, `db` and `jwt`. Loading never
//! fails; the JWT section is validated where it is consumed (the service
//! registry), so a missing secret stops the process before any token work.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub app: AppConfig,
    pub db: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            app: AppConfig::from_env(),
            db: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Process identity and listener settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Service name for logging
    pub name: String,
    /// Port to listen on
    pub port: u16,
    pub id: String,
}

impl AppConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: env::var("APP_NAME").unwrap_or(defaults.name),
            port: parse_env("APP_PORT").unwrap_or(defaults.port),
            id: env::var("APP_ID").unwrap_or(defaults.id),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "sample-api".to_string(),
            port: 8080,
            id: "sample-api".to_string(),
        }
    }
}

/// Database configuration.
#[derive(Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub max_idle_connections: u32,
    pub max_open_connections: u32,
    pub conn_max_idle_time_sec: u64,
    pub conn_max_life_time_sec: u64,
}

impl DatabaseConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("DB_HOST").unwrap_or(defaults.host),
            port: parse_env("DB_PORT").unwrap_or(defaults.port),
            name: env::var("DB_NAME").unwrap_or(defaults.name),
            user: env::var("DB_USER").unwrap_or(defaults.user),
            password: env::var("DB_PASSWORD").unwrap_or(defaults.password),
            max_idle_connections: parse_env("DB_MAX_IDLE_CONNECTIONS")
                .unwrap_or(defaults.max_idle_connections),
            max_open_connections: parse_env("DB_MAX_OPEN_CONNECTIONS")
                .unwrap_or(defaults.max_open_connections),
            conn_max_idle_time_sec: parse_env("DB_CONN_MAX_IDLE_TIME_SEC")
                .unwrap_or(defaults.conn_max_idle_time_sec),
            conn_max_life_time_sec: parse_env("DB_CONN_MAX_LIFE_TIME_SEC")
                .unwrap_or(defaults.conn_max_life_time_sec),
        }
    }

    /// Postgres connection URL.
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            name: String::new(),
            user: String::new(),
            password: String::new(),
            max_idle_connections: 2,
            max_open_connections: 5,
            conn_max_idle_time_sec: 10,
            conn_max_life_time_sec: 600,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("max_idle_connections", &self.max_idle_connections)
            .field("max_open_connections", &self.max_open_connections)
            .field("conn_max_idle_time_sec", &self.conn_max_idle_time_sec)
            .field("conn_max_life_time_sec", &self.conn_max_life_time_sec)
            .finish()
    }
}

/// JWT configuration for token issuance.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub secret: String,
    /// Default token lifetime in seconds
    pub expire_time_sec: i64,
    /// Lifetime for admin tokens; falls back to `expire_time_sec`
    pub admin_expire_time_sec: Option<i64>,
}

impl JwtConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: env::var("JWT_SECRET").unwrap_or(defaults.secret),
            expire_time_sec: parse_env("JWT_EXPIRE_TIME_SEC").unwrap_or(defaults.expire_time_sec),
            admin_expire_time_sec: parse_env("JWT_ADMIN_EXPIRE_TIME_SEC"),
        }
    }

    /// Config with the given secret and default lifetimes.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Self::default()
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expire_time_sec: 3600,
            admin_expire_time_sec: None,
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expire_time_sec", &self.expire_time_sec)
            .field("admin_expire_time_sec", &self.admin_expire_time_sec)
            .finish()
    }
}

/// Read and parse an environment variable, ignoring unset or malformed values.
fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
