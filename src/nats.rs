// Copyright (c) 2025 - Cowboy AI, Inc.
//! NATS connection for the key-value backend

use async_nats::jetstream;
use async_nats::{Client, ConnectOptions};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::store::NatsKvStore;

/// NATS connection errors
#[derive(Debug, Error)]
pub enum NatsError {
    #[error("NATS connection error: {0}")]
    Connection(String),
}

/// Configuration for NATS connection
#[derive(Debug, Clone)]
pub struct NatsConfig {
    /// NATS server URLs
    pub servers: Vec<String>,
    /// Client name
    pub name: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Request timeout
    pub request_timeout: Duration,
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            servers: vec!["nats://localhost:4222".to_string()],
            name: "mpls-inventory".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(5),
        }
    }
}

/// Connected NATS client
#[derive(Clone)]
pub struct NatsClient {
    client: Client,
}

impl NatsClient {
    /// Connect with the given configuration
    pub async fn connect(config: &NatsConfig) -> Result<Self, NatsError> {
        let connect_options = ConnectOptions::new()
            .name(&config.name)
            .connection_timeout(config.connect_timeout)
            .request_timeout(Some(config.request_timeout));

        let client = async_nats::connect_with_options(config.servers.join(","), connect_options)
            .await
            .map_err(|e| NatsError::Connection(e.to_string()))?;

        info!(servers = ?config.servers, "Connected to NATS");

        Ok(Self { client })
    }

    /// JetStream context over this connection
    pub fn jetstream(&self) -> jetstream::Context {
        jetstream::new(self.client.clone())
    }

    /// Document store keeping each collection in bucket `{prefix}_{collection}`
    pub fn document_store(&self, prefix: impl Into<String>) -> NatsKvStore {
        NatsKvStore::new(self.jetstream(), prefix)
    }

    /// Get the underlying NATS client for advanced operations
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NatsConfig::default();
        assert_eq!(config.servers, vec!["nats://localhost:4222"]);
        assert_eq!(config.name, "mpls-inventory");
    }
}
