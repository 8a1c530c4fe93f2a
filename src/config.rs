use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("Failed to load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub sql_logging: bool,
}

/// Reference names inserted at startup when missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedConfig {
    pub interests: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database: DatabaseConfig,
    pub run_migrations: bool,
    pub seed: SeedConfig,
    pub log_level: String,
}

impl AppConfig {
    /// Read configuration from the process environment.
    /// A `.env` file in the working directory is loaded first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err.into());
            }
        }
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = parse_or("BIND_ADDR", lookup("BIND_ADDR"), || {
            DEFAULT_BIND_ADDR.parse().ok()
        })?;
        let max_connections = parse_or("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), || {
            Some(10)
        })?;
        let min_connections = parse_or("DB_MIN_CONNECTIONS", lookup("DB_MIN_CONNECTIONS"), || {
            Some(1)
        })?;
        if min_connections > max_connections {
            return Err(ConfigError::Invalid {
                name: "DB_MIN_CONNECTIONS",
                value: min_connections.to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            database: DatabaseConfig {
                url,
                max_connections,
                min_connections,
                sql_logging: parse_bool("DB_SQL_LOGGING", lookup("DB_SQL_LOGGING"), false)?,
            },
            run_migrations: parse_bool("RUN_MIGRATIONS", lookup("RUN_MIGRATIONS"), true)?,
            seed: SeedConfig {
                interests: parse_list(lookup("SEED_INTERESTS")),
                skills: parse_list(lookup("SEED_SKILLS")),
            },
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

fn parse_or<T, D>(name: &'static str, value: Option<String>, default: D) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    D: FnOnce() -> Option<T>,
{
    match value {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw.clone(),
        }),
        None => default().ok_or(ConfigError::Missing(name)),
    }
}

fn parse_bool(name: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { name, value: raw }),
    }
}

fn parse_list(value: Option<String>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
