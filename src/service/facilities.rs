// Copyright (c) 2025 - Cowboy AI, Inc.
//! Locations and vendors

use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use super::{delete_or_not_found, guard_unreferenced, view_all, Repositories, ServiceOptions};
use crate::domain::{Location, Vendor};
use crate::errors::InventoryResult;
use crate::store::{Collection, Filter, Patch, UpdateOutcome};

/// Facade over the location and vendor registries
#[derive(Clone)]
pub struct FacilityService {
    repos: Repositories,
    options: ServiceOptions,
}

impl FacilityService {
    pub fn new(repos: Repositories, options: ServiceOptions) -> Self {
        Self { repos, options }
    }

    pub async fn create_location(&self, location: Location) -> InventoryResult<Location> {
        let location = self.repos.locations.insert(&location).await?;
        info!(location_id = %location.id, name = %location.name, "Created location");
        Ok(location)
    }

    pub async fn get_location(&self, id: Uuid, depth: u8) -> InventoryResult<Value> {
        self.repos.locations.view(id, depth).await
    }

    pub async fn list_locations(&self, depth: u8) -> InventoryResult<Vec<Value>> {
        view_all(&self.repos.locations, depth).await
    }

    /// Locations whose `group` equals `group`
    pub async fn locations_by_group(&self, group: &str, depth: u8) -> InventoryResult<Vec<Value>> {
        let locations = self
            .repos
            .locations
            .find(&Filter::new().eq("group", group))
            .await?;
        self.repos.locations.view_records(&locations, depth).await
    }

    pub async fn update_location(
        &self,
        id: Uuid,
        patch: &Patch,
    ) -> InventoryResult<UpdateOutcome<Location>> {
        self.repos.locations.update(id, patch).await
    }

    /// Delete a location, refusing while devices or L2 domains sit in it
    pub async fn delete_location(&self, id: Uuid) -> InventoryResult<()> {
        if self.options.guard_deletes {
            let store = self.repos.locations.store().as_ref();
            guard_unreferenced(store, Collection::Locations, id, Collection::Devices, &["location"])
                .await?;
            guard_unreferenced(store, Collection::Locations, id, Collection::L2Domains, &["location"])
                .await?;
        }
        delete_or_not_found(&self.repos.locations, id).await?;
        info!(location_id = %id, "Deleted location");
        Ok(())
    }

    pub async fn create_vendor(&self, vendor: Vendor) -> InventoryResult<Vendor> {
        let vendor = self.repos.vendors.insert(&vendor).await?;
        info!(vendor_id = %vendor.id, name = %vendor.name, "Created vendor");
        Ok(vendor)
    }

    pub async fn get_vendor(&self, id: Uuid, depth: u8) -> InventoryResult<Value> {
        self.repos.vendors.view(id, depth).await
    }

    pub async fn list_vendors(&self, depth: u8) -> InventoryResult<Vec<Value>> {
        view_all(&self.repos.vendors, depth).await
    }

    pub async fn update_vendor(
        &self,
        id: Uuid,
        patch: &Patch,
    ) -> InventoryResult<UpdateOutcome<Vendor>> {
        self.repos.vendors.update(id, patch).await
    }

    pub async fn delete_vendor(&self, id: Uuid) -> InventoryResult<()> {
        if self.options.guard_deletes {
            let store = self.repos.vendors.store().as_ref();
            guard_unreferenced(store, Collection::Vendors, id, Collection::Devices, &["vendor"])
                .await?;
        }
        delete_or_not_found(&self.repos.vendors, id).await?;
        info!(vendor_id = %id, "Deleted vendor");
        Ok(())
    }
}
