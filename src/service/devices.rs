// Copyright (c) 2025 - Cowboy AI, Inc.
//! Device facade
//!
//! Management addresses are unique per host: `10.0.0.1/24` and
//! `10.0.0.1/30` collide. The check is a scan over every device, so it is
//! O(n) in the inventory size.

use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use super::{ensure_exists, view_all, Repositories};
use crate::domain::invariants::host_collision;
use crate::domain::Device;
use crate::errors::{InventoryError, InventoryResult};
use crate::store::{Filter, Patch, UpdateOutcome};

const DELETE_STEPS: usize = 3;

/// Facade over the device registry
#[derive(Clone)]
pub struct DeviceService {
    repos: Repositories,
}

impl DeviceService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Fail with `AlreadyExists` when another device holds the same host address
    async fn ensure_address_free(&self, device: &Device) -> InventoryResult<()> {
        let Some(candidate) = &device.ipaddr else {
            return Ok(());
        };
        let others: Vec<Device> = self
            .repos
            .devices
            .list()
            .await?
            .into_iter()
            .filter(|other| other.id != device.id)
            .collect();
        let existing = others.iter().filter_map(|other| other.ipaddr.as_ref());
        if let Some(taken) = host_collision(candidate, existing) {
            return Err(InventoryError::already_exists("Device", taken.address()));
        }
        Ok(())
    }

    async fn ensure_references(&self, device: &Device) -> InventoryResult<()> {
        ensure_exists(&self.repos.locations, device.location).await?;
        ensure_exists(&self.repos.vendors, device.vendor).await
    }

    pub async fn create_device(&self, device: Device) -> InventoryResult<Device> {
        self.ensure_references(&device).await?;
        self.ensure_address_free(&device).await?;
        let device = self.repos.devices.insert(&device).await?;
        info!(device_id = %device.id, name = %device.name, "Created device");
        Ok(device)
    }

    pub async fn get_device(&self, id: Uuid, depth: u8) -> InventoryResult<Value> {
        self.repos.devices.view(id, depth).await
    }

    pub async fn list_devices(&self, depth: u8) -> InventoryResult<Vec<Value>> {
        view_all(&self.repos.devices, depth).await
    }

    /// Partial update; new location/vendor references and a new address are
    /// checked like on create
    pub async fn update_device(
        &self,
        id: Uuid,
        patch: &Patch,
    ) -> InventoryResult<UpdateOutcome<Device>> {
        let (current, merged) = self.repos.devices.preview(id, patch).await?;
        if merged.location != current.location || merged.vendor != current.vendor {
            self.ensure_references(&merged).await?;
        }
        if merged.ipaddr != current.ipaddr {
            self.ensure_address_free(&merged).await?;
        }
        self.repos.devices.update(id, patch).await
    }

    /// Delete a device and its physical interfaces
    ///
    /// Steps: detach location and vendor, delete interfaces, delete the
    /// device. Paths naming the device as a hop are left alone.
    pub async fn delete_device(&self, id: Uuid) -> InventoryResult<()> {
        let mut device = self.repos.devices.require(id).await?;
        let incomplete = |completed: usize, err: InventoryError| {
            warn!(device_id = %id, completed, error = %err, "Device delete stopped");
            InventoryError::Incomplete {
                operation: "delete device".to_string(),
                completed,
                total: DELETE_STEPS,
                reason: err.to_string(),
            }
        };

        device.location = None;
        device.vendor = None;
        self.repos
            .devices
            .save(&device)
            .await
            .map_err(|err| incomplete(0, err))?;

        let removed = self
            .repos
            .interfaces
            .delete_many(&Filter::new().eq("device", id.to_string()))
            .await
            .map_err(|err| incomplete(1, err.into()))?;

        if !self
            .repos
            .devices
            .delete(id)
            .await
            .map_err(|err| incomplete(2, err.into()))?
        {
            return Err(incomplete(2, InventoryError::not_found("Device", id)));
        }

        info!(device_id = %id, interfaces = removed, "Deleted device");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InterfaceSingle, IpAddressWithCidr, Location};
    use crate::service::Inventory;

    fn ip(cidr: &str) -> Option<IpAddressWithCidr> {
        Some(IpAddressWithCidr::new(cidr).unwrap())
    }

    #[tokio::test]
    async fn test_same_host_address_is_rejected() {
        let inventory = Inventory::in_memory();
        inventory
            .devices
            .create_device(Device::new("R1", ip("10.0.0.1/24")))
            .await
            .unwrap();
        let err = inventory
            .devices
            .create_device(Device::new("R2", ip("10.0.0.1/30")))
            .await
            .unwrap_err();
        assert_eq!(err, InventoryError::already_exists("Device", "10.0.0.1"));
    }

    #[tokio::test]
    async fn test_unknown_location_is_not_found() {
        let inventory = Inventory::in_memory();
        let mut device = Device::new("R1", None);
        device.location = Some(Uuid::now_v7());
        let err = inventory.devices.create_device(device).await.unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[tokio::test]
    async fn test_update_rechecks_address() {
        let inventory = Inventory::in_memory();
        inventory
            .devices
            .create_device(Device::new("R1", ip("10.0.0.1/24")))
            .await
            .unwrap();
        let r2 = inventory
            .devices
            .create_device(Device::new("R2", ip("10.0.0.2/24")))
            .await
            .unwrap();

        // Own address with another prefix is not a collision
        let outcome = inventory
            .devices
            .update_device(r2.id, &Patch::new().set("ipaddr", "10.0.0.2/30"))
            .await
            .unwrap();
        assert_eq!(outcome.changed, vec!["ipaddr".to_string()]);

        let err = inventory
            .devices
            .update_device(r2.id, &Patch::new().set("ipaddr", "10.0.0.1/32"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "already_exists");
    }

    #[tokio::test]
    async fn test_delete_cascades_to_interfaces() {
        let inventory = Inventory::in_memory();
        let location = inventory
            .facilities
            .create_location(Location::named("POA"))
            .await
            .unwrap();
        let mut device = Device::new("R1", None);
        device.location = Some(location.id);
        let device = inventory.devices.create_device(device).await.unwrap();
        inventory
            .interfaces
            .create_interface_on_device(device.id, InterfaceSingle::named("ge-0/0/1"))
            .await
            .unwrap();

        inventory.devices.delete_device(device.id).await.unwrap();

        assert!(inventory.interfaces.list_interfaces(0).await.unwrap().is_empty());
        // Location is no longer referenced, so the guarded delete passes
        inventory.facilities.delete_location(location.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_device() {
        let inventory = Inventory::in_memory();
        let err = inventory.devices.delete_device(Uuid::now_v7()).await.unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }
}
