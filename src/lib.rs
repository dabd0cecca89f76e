// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network inventory backend for MPLS meshes
//!
//! Keeps the sites, vendors, devices, interfaces, LAGs, VRFs, L2 domains,
//! VLANs, circuits, paths, tunnels and tunnel traffic policies of a
//! network, and enforces the cross-entity rules between them.
//!
//! # Layers
//!
//! ```text
//! api            axum router under /ipam, response envelope
//!   ↓
//! service        Inventory facades (facilities, devices, interfaces,
//!   ↓            addressing, topology)
//! domain         records, value objects, cross-entity invariants
//! state_machine  LAG membership transitions
//!   ↓
//! store          Repository<T> over DocumentStore (memory or NATS KV)
//! ```
//!
//! # Example
//!
//! ```rust
//! use mpls_inventory::domain::Location;
//! use mpls_inventory::Inventory;
//!
//! # tokio_test::block_on(async {
//! let inventory = Inventory::in_memory();
//! let site = inventory
//!     .facilities
//!     .create_location(Location::named("POA"))
//!     .await
//!     .unwrap();
//! assert_eq!(site.name, "POA");
//! # });
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod nats;
pub mod service;
pub mod state_machine;
pub mod store;
pub mod telemetry;

pub use config::{Backend, ConfigError, InventoryConfig};
pub use errors::{InventoryError, InventoryResult};
pub use nats::{NatsClient, NatsConfig, NatsError};
pub use service::{Inventory, ServiceOptions};
pub use store::{DocumentStore, InMemoryStore, NatsKvStore};
pub use telemetry::{init_tracing, RequestContext};
