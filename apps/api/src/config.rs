use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if a provided value cannot be parsed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. `None` runs the service on the seeded in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub run_migrations: bool,
    pub port: u16,
    pub rust_log: String,
    /// Symbol prefixed to both ends of a formatted salary band.
    pub salary_currency: String,
    /// Capacity of the analytics channel; events beyond it are dropped.
    pub analytics_buffer: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 10)?,
            run_migrations: parse_env("RUN_MIGRATIONS", true)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            salary_currency: std::env::var("SALARY_CURRENCY").unwrap_or_else(|_| "$".to_string()),
            analytics_buffer: parse_env("ANALYTICS_BUFFER", 256)?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}
