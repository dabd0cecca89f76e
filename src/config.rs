// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service configuration
//!
//! Loaded from environment variables, with an optional `.env` file in the
//! working directory:
//!
//! | Variable | Default |
//! |---|---|
//! | `INVENTORY_BIND` | `0.0.0.0:8000` |
//! | `INVENTORY_BACKEND` | `memory` (`memory` or `nats`) |
//! | `NATS_URL` | `nats://localhost:4222` |
//! | `INVENTORY_BUCKET_PREFIX` | `inventory` |
//! | `INVENTORY_LOG` | `info` |
//! | `INVENTORY_LOG_JSON` | `false` |
//! | `INVENTORY_ALLOWED_ORIGINS` | `http://localhost:8000,http://127.0.0.1:8000` |
//! | `INVENTORY_GUARD_DELETES` | `true` |

use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

use crate::nats::NatsConfig;

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Persistence backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Process-local store, lost on restart
    #[default]
    Memory,
    /// NATS JetStream key-value buckets
    Nats,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Backend::Memory),
            "nats" => Ok(Backend::Nats),
            other => Err(format!("unknown backend '{other}', expected memory or nats")),
        }
    }
}

/// Inventory service configuration
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// HTTP listen address
    pub bind: SocketAddr,
    /// Persistence backend
    pub backend: Backend,
    /// NATS connection, used by the `nats` backend
    pub nats: NatsConfig,
    /// KV bucket name prefix
    pub bucket_prefix: String,
    /// Default tracing filter directive
    pub log_filter: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// CORS allowed origins
    pub allowed_origins: Vec<String>,
    /// Refuse deletes that would leave dangling references
    pub guard_deletes: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            backend: Backend::Memory,
            nats: NatsConfig::default(),
            bucket_prefix: "inventory".to_string(),
            log_filter: "info".to_string(),
            log_json: false,
            allowed_origins: vec![
                "http://localhost:8000".to_string(),
                "http://127.0.0.1:8000".to_string(),
            ],
            guard_deletes: true,
        }
    }
}

fn parse<T>(key: &'static str, value: String) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        reason: e.to_string(),
        value,
    })
}

fn parse_bool(key: &'static str, value: String) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value,
            reason: "expected a boolean".to_string(),
        }),
    }
}

impl InventoryConfig {
    /// Load configuration from the process environment
    ///
    /// A `.env` file is read first when present; variables already set in
    /// the environment win.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("INVENTORY_BIND") {
            config.bind = parse("INVENTORY_BIND", value)?;
        }
        if let Some(value) = lookup("INVENTORY_BACKEND") {
            config.backend = parse("INVENTORY_BACKEND", value)?;
        }
        if let Some(value) = lookup("NATS_URL") {
            config.nats.servers = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(value) = lookup("INVENTORY_BUCKET_PREFIX") {
            config.bucket_prefix = value;
        }
        if let Some(value) = lookup("INVENTORY_LOG") {
            config.log_filter = value;
        }
        if let Some(value) = lookup("INVENTORY_LOG_JSON") {
            config.log_json = parse_bool("INVENTORY_LOG_JSON", value)?;
        }
        if let Some(value) = lookup("INVENTORY_ALLOWED_ORIGINS") {
            config.allowed_origins = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(value) = lookup("INVENTORY_GUARD_DELETES") {
            config.guard_deletes = parse_bool("INVENTORY_GUARD_DELETES", value)?;
        }

        Ok(config)
    }
}
