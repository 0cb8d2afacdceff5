use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Bootstrap administrator credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

/// Server settings read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub run_migrations: bool,
    pub admin: Option<AdminCredentials>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            None => true,
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "RUN_MIGRATIONS",
                        value,
                    });
                }
            },
        };

        let admin = match (lookup("ADMIN_USERNAME"), lookup("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(AdminCredentials { username, password })
            }
            (Some(_), None) => return Err(ConfigError::Missing("ADMIN_PASSWORD")),
            _ => None,
        };

        Ok(Self {
            database_url,
            bind_addr,
            run_migrations,
            admin,
        })
    }
}
