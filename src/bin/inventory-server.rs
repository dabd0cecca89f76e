// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory HTTP Server
//!
//! Serves the inventory API under `/ipam` on top of the configured
//! document store.
//!
//! Run with: cargo run --bin inventory-server
//!
//! Configuration comes from the environment (and `.env`); see
//! `mpls_inventory::config` for the variables. With
//! `INVENTORY_BACKEND=nats` a NATS server with JetStream enabled must be
//! reachable at `NATS_URL`.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use mpls_inventory::{
    api, init_tracing, Backend, DocumentStore, InMemoryStore, Inventory, InventoryConfig,
    NatsClient, ServiceOptions,
};

async fn open_store(config: &InventoryConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.backend {
        Backend::Memory => {
            info!("🗃️  Using in-memory store (data is lost on restart)");
            Ok(Arc::new(InMemoryStore::new()))
        }
        Backend::Nats => {
            info!("🔌 Connecting to NATS at {:?}", config.nats.servers);
            let client = NatsClient::connect(&config.nats)
                .await
                .context("Failed to connect to NATS")?;
            info!("✅ Connected to NATS");
            info!("📦 Using KV buckets with prefix '{}'", config.bucket_prefix);
            Ok(Arc::new(client.document_store(config.bucket_prefix.clone())))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("🛑 Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = InventoryConfig::from_env().context("Invalid configuration")?;

    init_tracing(&config.log_filter, config.log_json)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    info!("🚀 Starting inventory server");
    info!("📋 Configuration loaded:");
    info!("  - Bind: {}", config.bind);
    info!("  - Backend: {:?}", config.backend);
    info!("  - Guard deletes: {}", config.guard_deletes);
    info!("  - Allowed origins: {}", config.allowed_origins.join(", "));

    let store = open_store(&config).await?;
    let inventory = Inventory::new(
        store,
        ServiceOptions {
            guard_deletes: config.guard_deletes,
        },
    );
    let app = api::router(inventory, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("🎧 Listening on http://{}{}", config.bind, api::BASE_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("👋 Inventory server stopped");
    Ok(())
}
