// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for Inventory Management
//!
//! Facades that load and mutate records through the store while enforcing
//! the cross-entity rules: uniqueness beyond store indexes, reference
//! existence, LAG membership, circuit endpoints, and delete guards.
//!
//! # Architecture
//!
//! ```text
//! HTTP handler
//!     ↓
//! Facade (this module)
//!     ↓
//! Repository<T> → DocumentStore
//! ```
//!
//! # Facades
//!
//! - [`FacilityService`]: locations and vendors
//! - [`DeviceService`]: devices
//! - [`InterfaceService`]: physical interfaces and LAGs
//! - [`AddressingService`]: VRFs, L2 domains and VLANs
//! - [`TopologyService`]: circuits, paths, tunnels and traffic policies
//!
//! # Transaction Semantics
//!
//! Only single-document writes are atomic. Multi-document operations
//! (device delete, LAG seeding and delete, L2 domain delete) run as
//! ordered steps; a failure part way reports
//! [`InventoryError::Incomplete`] with the number of completed steps.
//!
//! # Example
//!
//! ```rust
//! use mpls_inventory::domain::Vendor;
//! use mpls_inventory::service::Inventory;
//!
//! # tokio_test::block_on(async {
//! let inventory = Inventory::in_memory();
//! let vendor = inventory.facilities.create_vendor(Vendor::named("Nokia")).await.unwrap();
//! assert!(!vendor.id.is_nil());
//! # });
//! ```

pub mod addressing;
pub mod devices;
pub mod facilities;
pub mod interfaces;
pub mod topology;

pub use addressing::AddressingService;
pub use devices::DeviceService;
pub use facilities::FacilityService;
pub use interfaces::InterfaceService;
pub use topology::TopologyService;

use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    Circuit, Device, InterfaceLag, InterfaceSingle, L2Domain, Location, Path, Tunnel,
    TunnelTrafficPolicy, Vendor, Vlan, Vrf,
};
use crate::errors::{InventoryError, InventoryResult};
use crate::store::{Collection, Document, DocumentStore, Filter, InMemoryStore, Repository};

/// Behaviour switches shared by the facades
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Refuse deletes that would leave dangling references
    pub guard_deletes: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            guard_deletes: true,
        }
    }
}

/// One repository per collection, sharing a store
#[derive(Clone)]
pub struct Repositories {
    pub locations: Repository<Location>,
    pub vendors: Repository<Vendor>,
    pub devices: Repository<Device>,
    pub interfaces: Repository<InterfaceSingle>,
    pub lags: Repository<InterfaceLag>,
    pub vrfs: Repository<Vrf>,
    pub l2domains: Repository<L2Domain>,
    pub vlans: Repository<Vlan>,
    pub circuits: Repository<Circuit>,
    pub paths: Repository<Path>,
    pub tunnels: Repository<Tunnel>,
    pub policies: Repository<TunnelTrafficPolicy>,
}

impl Repositories {
    /// Repositories over `store`
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            locations: Repository::new(Arc::clone(&store)),
            vendors: Repository::new(Arc::clone(&store)),
            devices: Repository::new(Arc::clone(&store)),
            interfaces: Repository::new(Arc::clone(&store)),
            lags: Repository::new(Arc::clone(&store)),
            vrfs: Repository::new(Arc::clone(&store)),
            l2domains: Repository::new(Arc::clone(&store)),
            vlans: Repository::new(Arc::clone(&store)),
            circuits: Repository::new(Arc::clone(&store)),
            paths: Repository::new(Arc::clone(&store)),
            tunnels: Repository::new(Arc::clone(&store)),
            policies: Repository::new(store),
        }
    }
}

/// All facades over one store
#[derive(Clone)]
pub struct Inventory {
    pub facilities: FacilityService,
    pub devices: DeviceService,
    pub interfaces: InterfaceService,
    pub addressing: AddressingService,
    pub topology: TopologyService,
}

impl Inventory {
    /// Facades over `store`
    pub fn new(store: Arc<dyn DocumentStore>, options: ServiceOptions) -> Self {
        let repos = Repositories::new(store);
        Self {
            facilities: FacilityService::new(repos.clone(), options),
            devices: DeviceService::new(repos.clone()),
            interfaces: InterfaceService::new(repos.clone()),
            addressing: AddressingService::new(repos.clone(), options),
            topology: TopologyService::new(repos, options),
        }
    }

    /// Facades over a fresh in-memory store with default options
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()), ServiceOptions::default())
    }
}

/// Resolve every record of a collection to `depth`
pub(crate) async fn view_all<T: Document>(
    repo: &Repository<T>,
    depth: u8,
) -> InventoryResult<Vec<Value>> {
    let records = repo.list().await?;
    repo.view_records(&records, depth).await
}

/// Fail with `NotFound` unless the referenced record exists
pub(crate) async fn ensure_exists<T: Document>(
    repo: &Repository<T>,
    id: Option<Uuid>,
) -> InventoryResult<()> {
    if let Some(id) = id {
        if !repo.exists(id).await? {
            return Err(InventoryError::not_found(T::COLLECTION.entity(), id));
        }
    }
    Ok(())
}

/// Fail with `NotFound` unless every referenced record exists
pub(crate) async fn ensure_all_exist<T: Document>(
    repo: &Repository<T>,
    ids: impl IntoIterator<Item = Uuid>,
) -> InventoryResult<()> {
    for id in ids {
        ensure_exists(repo, Some(id)).await?;
    }
    Ok(())
}

/// Remove a record or fail with `NotFound`
pub(crate) async fn delete_or_not_found<T: Document>(
    repo: &Repository<T>,
    id: Uuid,
) -> InventoryResult<()> {
    if repo.delete(id).await? {
        Ok(())
    } else {
        Err(InventoryError::not_found(T::COLLECTION.entity(), id))
    }
}

/// Refuse to delete `target` while documents of `source` still point at it
/// through any of `fields`
pub(crate) async fn guard_unreferenced(
    store: &dyn DocumentStore,
    target: Collection,
    id: Uuid,
    source: Collection,
    fields: &'static [&'static str],
) -> InventoryResult<()> {
    let filter = Filter::new().any_eq(fields, id.to_string());
    let referrers = store.find(source, &filter).await?.len();
    if referrers > 0 {
        return Err(InventoryError::domain(format!(
            "{} {} is still referenced by {} {}",
            target.entity(),
            id,
            referrers,
            source.name()
        )));
    }
    Ok(())
}
