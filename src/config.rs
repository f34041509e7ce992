//! Runtime configuration from environment variables (a `.env` file is honoured).

use crate::error::ConfigError;
use std::collections::HashMap;
use std::str::FromStr;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/bookmarks";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_API_PREFIX: &str = "/api";
const DEFAULT_SCHEMA: &str = "public";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    /// Bearer token every bookmark request must present.
    pub api_token: String,
    pub host: String,
    pub port: u16,
    /// Mount point of the bookmark routes, e.g. `/api`. Empty mounts at the root.
    pub api_prefix: String,
    /// PostgreSQL schema holding `bookmark_items`.
    pub schema: String,
    pub max_connections: u32,
    pub max_body_bytes: usize,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(&std::env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let api_token = get("API_TOKEN")
            .ok_or(ConfigError::Missing("API_TOKEN"))?
            .to_string();
        let api_prefix = normalize_prefix(get("API_PREFIX").unwrap_or(DEFAULT_API_PREFIX));

        Ok(Config {
            database_url: get("DATABASE_URL").unwrap_or(DEFAULT_DATABASE_URL).to_string(),
            api_token,
            host: get("HOST").unwrap_or(DEFAULT_HOST).to_string(),
            port: parse_or(vars, "PORT", DEFAULT_PORT)?,
            api_prefix,
            schema: get("BOOKMARKS_SCHEMA").unwrap_or(DEFAULT_SCHEMA).to_string(),
            max_connections: parse_or(vars, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            max_body_bytes: parse_or(vars, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    vars: &HashMap<String, String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
            key,
            value: v.to_string(),
        }),
    }
}

/// `api/` and `/api/` both become `/api`; `/` becomes empty.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
