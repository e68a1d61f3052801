//! Server configuration read from the environment
//!
//! Database settings live in [`crate::database::DatabaseConfig`]; this covers
//! everything else the binary and the router need.

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Mounted in front of every route, e.g. `/api`. Empty means root.
    pub route_prefix: String,
    /// Report unknown field labels instead of dropping them
    pub strict_mapping: bool,
    /// HS256 secret for bearer tokens; without one `/user` always answers 401
    pub jwt_secret: Option<String>,
    pub run_migrations: bool,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            route_prefix: String::new(),
            strict_mapping: false,
            jwt_secret: None,
            run_migrations: true,
            cors_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset and blank values keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("SERVER_HOST") {
            config.host = host;
        }
        if let Some(port) = get("SERVER_PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("SERVER_PORT is not a valid port: {}", port))?;
        }
        if let Some(prefix) = get("ROUTE_PREFIX") {
            config.route_prefix = normalize_prefix(&prefix);
        }
        if let Some(flag) = get("STRICT_FIELD_MAPPING") {
            config.strict_mapping = parse_flag("STRICT_FIELD_MAPPING", &flag)?;
        }
        if let Some(flag) = get("RUN_MIGRATIONS") {
            config.run_migrations = parse_flag("RUN_MIGRATIONS", &flag)?;
        }
        config.jwt_secret = get("JWT_SECRET");
        if let Some(origins) = get("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty() && *o != "*")
                .map(String::from)
                .collect();
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{} must be a boolean, got '{}'", name, other),
    }
}
