// Copyright (c) 2025 - Cowboy AI, Inc.
//! VRFs, L2 domains and VLANs
//!
//! VLAN numbers are unique inside their L2 domain, or across every domain
//! when the VLAN is flagged `unique`. Bulk ranges are half-open
//! (`[start, end)`), validated against the operational bounds 2..=4094,
//! and checked for collisions before anything is written.

use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    delete_or_not_found, ensure_exists, guard_unreferenced, view_all, Repositories,
    ServiceOptions,
};
use crate::domain::invariants::range_collisions;
use crate::domain::{L2Domain, Vlan, VlanNumber, VlanRange, Vrf};
use crate::errors::{InventoryError, InventoryResult};
use crate::store::{Collection, Filter, Patch, UpdateOutcome};

/// Facade over the addressing registries
#[derive(Clone)]
pub struct AddressingService {
    repos: Repositories,
    options: ServiceOptions,
}

impl AddressingService {
    pub fn new(repos: Repositories, options: ServiceOptions) -> Self {
        Self { repos, options }
    }

    // VRFs

    pub async fn create_vrf(&self, vrf: Vrf) -> InventoryResult<Vrf> {
        let vrf = self.repos.vrfs.insert(&vrf).await?;
        info!(vrf_id = %vrf.id, name = %vrf.name, "Created vrf");
        Ok(vrf)
    }

    pub async fn get_vrf(&self, id: Uuid, depth: u8) -> InventoryResult<Value> {
        self.repos.vrfs.view(id, depth).await
    }

    pub async fn list_vrfs(&self, depth: u8) -> InventoryResult<Vec<Value>> {
        view_all(&self.repos.vrfs, depth).await
    }

    pub async fn update_vrf(&self, id: Uuid, patch: &Patch) -> InventoryResult<UpdateOutcome<Vrf>> {
        self.repos.vrfs.update(id, patch).await
    }

    pub async fn delete_vrf(&self, id: Uuid) -> InventoryResult<()> {
        if self.options.guard_deletes {
            let store = self.repos.vrfs.store().as_ref();
            guard_unreferenced(store, Collection::Vrfs, id, Collection::Interfaces, &["vrf"]).await?;
            guard_unreferenced(store, Collection::Vrfs, id, Collection::Lags, &["vrf"]).await?;
        }
        delete_or_not_found(&self.repos.vrfs, id).await?;
        info!(vrf_id = %id, "Deleted vrf");
        Ok(())
    }

    // L2 domains

    pub async fn create_l2domain(&self, domain: L2Domain) -> InventoryResult<L2Domain> {
        ensure_exists(&self.repos.locations, domain.location).await?;
        let domain = self.repos.l2domains.insert(&domain).await?;
        info!(l2domain_id = %domain.id, name = %domain.name, "Created l2domain");
        Ok(domain)
    }

    pub async fn get_l2domain(&self, id: Uuid, depth: u8) -> InventoryResult<Value> {
        self.repos.l2domains.view(id, depth).await
    }

    pub async fn list_l2domains(&self, depth: u8) -> InventoryResult<Vec<Value>> {
        view_all(&self.repos.l2domains, depth).await
    }

    pub async fn l2domains_by_location(
        &self,
        location_id: Uuid,
        depth: u8,
    ) -> InventoryResult<Vec<Value>> {
        let domains = self
            .repos
            .l2domains
            .find(&Filter::new().eq("location", location_id.to_string()))
            .await?;
        self.repos.l2domains.view_records(&domains, depth).await
    }

    pub async fn update_l2domain(
        &self,
        id: Uuid,
        patch: &Patch,
    ) -> InventoryResult<UpdateOutcome<L2Domain>> {
        let (current, merged) = self.repos.l2domains.preview(id, patch).await?;
        if merged.location != current.location {
            ensure_exists(&self.repos.locations, merged.location).await?;
        }
        self.repos.l2domains.update(id, patch).await
    }

    /// Delete the domain's VLANs, then the domain
    ///
    /// The domain survives if the VLAN cleanup fails. The two steps are not
    /// atomic: VLANs removed before a failure stay removed.
    pub async fn delete_l2domain(&self, id: Uuid) -> InventoryResult<()> {
        self.repos.l2domains.require(id).await?;

        let removed = match self
            .repos
            .vlans
            .delete_many(&Filter::new().eq("l2domain", id.to_string()))
            .await
        {
            Ok(removed) => removed,
            Err(err) => {
                warn!(l2domain_id = %id, error = %err, "VLAN cleanup failed, keeping l2domain");
                return Err(InventoryError::Incomplete {
                    operation: "delete l2domain".to_string(),
                    completed: 0,
                    total: 2,
                    reason: err.to_string(),
                });
            }
        };

        delete_or_not_found(&self.repos.l2domains, id)
            .await
            .map_err(|err| InventoryError::Incomplete {
                operation: "delete l2domain".to_string(),
                completed: 1,
                total: 2,
                reason: err.to_string(),
            })?;

        info!(l2domain_id = %id, vlans = removed, "Deleted l2domain");
        Ok(())
    }

    // VLANs

    /// Fail with `AlreadyExists` when `number` is taken in the VLAN's scope
    async fn ensure_number_free(
        &self,
        number: VlanNumber,
        l2domain: Uuid,
        unique: bool,
        except: Option<Uuid>,
    ) -> InventoryResult<()> {
        let mut filter = Filter::new().eq("number", number);
        if !unique {
            filter = filter.eq("l2domain", l2domain.to_string());
        }
        let taken = self
            .repos
            .vlans
            .find(&filter)
            .await?
            .into_iter()
            .any(|vlan| Some(vlan.id) != except);
        if taken {
            return Err(InventoryError::already_exists("Vlan", number));
        }
        Ok(())
    }

    pub async fn create_vlan(&self, vlan: Vlan) -> InventoryResult<Vlan> {
        let Some(l2domain) = vlan.l2domain else {
            return Err(InventoryError::validation("Vlan requires an l2domain"));
        };
        self.repos.l2domains.require(l2domain).await?;
        self.ensure_number_free(vlan.number, l2domain, vlan.unique, None)
            .await?;

        let vlan = self.repos.vlans.insert(&vlan).await?;
        info!(vlan_id = %vlan.id, number = %vlan.number, %l2domain, "Created vlan");
        Ok(vlan)
    }

    /// Create one VLAN per number of `[start, end)` in a domain
    ///
    /// Any existing number inside the range rejects the whole range; the
    /// batch insert itself is all-or-nothing on unique collisions.
    pub async fn create_vlan_range(
        &self,
        l2domain: Uuid,
        start: i64,
        end: i64,
    ) -> InventoryResult<Vec<Vlan>> {
        let range = VlanRange::for_creation(start, end)?;
        let domain = self.repos.l2domains.require(l2domain).await?;

        let existing = self
            .repos
            .vlans
            .find(&Filter::new().eq("l2domain", l2domain.to_string()))
            .await?;
        let collisions = range_collisions(&range, existing.iter().map(|vlan| vlan.number.value()));
        if !collisions.is_empty() {
            warn!(%l2domain, %range, ?collisions, "VLAN range overlaps existing numbers");
            return Err(InventoryError::already_exists("Vlan", format!("range {range}")));
        }

        let vlans = range
            .numbers()
            .map(|n| VlanNumber::new(i64::from(n)).map(|number| Vlan::for_range(&domain, number)))
            .collect::<Result<Vec<_>, _>>()?;
        let vlans = self.repos.vlans.insert_many(&vlans).await?;

        info!(%l2domain, %range, count = vlans.len(), "Created vlan range");
        Ok(vlans)
    }

    /// Delete the VLANs of a domain numbered in `[start, end)`
    pub async fn delete_vlan_range(
        &self,
        l2domain: Uuid,
        start: i64,
        end: i64,
    ) -> InventoryResult<usize> {
        let range = VlanRange::for_deletion(start, end)?;
        self.repos.l2domains.require(l2domain).await?;

        let filter = Filter::new()
            .eq("l2domain", l2domain.to_string())
            .in_range("number", i64::from(range.start()), i64::from(range.end()));
        let removed = self.repos.vlans.delete_many(&filter).await?;
        if removed == 0 {
            return Err(InventoryError::not_found("Vlan", format!("range {range}")));
        }

        info!(%l2domain, %range, count = removed, "Deleted vlan range");
        Ok(removed)
    }

    pub async fn get_vlan(&self, id: Uuid, depth: u8) -> InventoryResult<Value> {
        self.repos.vlans.view(id, depth).await
    }

    pub async fn list_vlans(&self, depth: u8) -> InventoryResult<Vec<Value>> {
        view_all(&self.repos.vlans, depth).await
    }

    /// VLANs of a domain; an empty domain is `NotFound`
    pub async fn vlans_by_l2domain(&self, l2domain: Uuid, depth: u8) -> InventoryResult<Vec<Value>> {
        let vlans = self
            .repos
            .vlans
            .find(&Filter::new().eq("l2domain", l2domain.to_string()))
            .await?;
        if vlans.is_empty() {
            return Err(InventoryError::not_found("Vlans of l2domain", l2domain));
        }
        self.repos.vlans.view_records(&vlans, depth).await
    }

    /// Partial update; the domain of a VLAN never changes
    pub async fn update_vlan(&self, id: Uuid, patch: &Patch) -> InventoryResult<UpdateOutcome<Vlan>> {
        let mut patch = patch.clone();
        patch.remove("l2domain");

        let (current, merged) = self.repos.vlans.preview(id, &patch).await?;
        if merged.number != current.number || merged.unique != current.unique {
            if let Some(l2domain) = merged.l2domain {
                self.ensure_number_free(merged.number, l2domain, merged.unique, Some(id))
                    .await?;
            }
        }
        self.repos.vlans.update(id, &patch).await
    }

    pub async fn delete_vlan(&self, id: Uuid) -> InventoryResult<()> {
        delete_or_not_found(&self.repos.vlans, id).await?;
        info!(vlan_id = %id, "Deleted vlan");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::Inventory;

    async fn domain(inventory: &Inventory, name: &str) -> L2Domain {
        inventory
            .addressing
            .create_l2domain(L2Domain::named(name))
            .await
            .unwrap()
    }

    fn vlan(number: i64, l2domain: Uuid) -> Vlan {
        Vlan {
            id: Uuid::nil(),
            name: Some(format!("VLAN{number}")),
            alias: None,
            number: VlanNumber::new(number).unwrap(),
            description: None,
            l2domain: Some(l2domain),
            unique: false,
        }
    }

    #[tokio::test]
    async fn test_vlan_numbers_are_scoped_to_domain() {
        let inventory = Inventory::in_memory();
        let dc1 = domain(&inventory, "DC1").await;
        let dc2 = domain(&inventory, "DC2").await;

        inventory.addressing.create_vlan(vlan(100, dc1.id)).await.unwrap();
        inventory.addressing.create_vlan(vlan(100, dc2.id)).await.unwrap();
        let err = inventory
            .addressing
            .create_vlan(vlan(100, dc1.id))
            .await
            .unwrap_err();
        assert_eq!(err, InventoryError::already_exists("Vlan", "100"));
    }

    #[tokio::test]
    async fn test_unique_vlan_checks_every_domain() {
        let inventory = Inventory::in_memory();
        let dc1 = domain(&inventory, "DC1").await;
        let dc2 = domain(&inventory, "DC2").await;
        inventory.addressing.create_vlan(vlan(200, dc1.id)).await.unwrap();

        let mut global = vlan(200, dc2.id);
        global.unique = true;
        let err = inventory.addressing.create_vlan(global).await.unwrap_err();
        assert_eq!(err.kind(), "already_exists");
    }

    #[tokio::test]
    async fn test_vlan_without_domain() {
        let inventory = Inventory::in_memory();
        let mut orphan = vlan(10, Uuid::now_v7());
        let err = inventory.addressing.create_vlan(orphan.clone()).await.unwrap_err();
        assert_eq!(err.kind(), "not_found");

        orphan.l2domain = None;
        let err = inventory.addressing.create_vlan(orphan).await.unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[tokio::test]
    async fn test_delete_vlan_range() {
        let inventory = Inventory::in_memory();
        let dc1 = domain(&inventory, "DC1").await;
        inventory
            .addressing
            .create_vlan_range(dc1.id, 10, 20)
            .await
            .unwrap();

        let removed = inventory
            .addressing
            .delete_vlan_range(dc1.id, 15, 30)
            .await
            .unwrap();
        assert_eq!(removed, 5);

        let err = inventory
            .addressing
            .delete_vlan_range(dc1.id, 15, 30)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "not_found");

        let err = inventory
            .addressing
            .delete_vlan_range(dc1.id, 30, 15)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[tokio::test]
    async fn test_delete_l2domain_removes_its_vlans() {
        let inventory = Inventory::in_memory();
        let dc1 = domain(&inventory, "DC1").await;
        let dc2 = domain(&inventory, "DC2").await;
        inventory.addressing.create_vlan_range(dc1.id, 10, 13).await.unwrap();
        inventory.addressing.create_vlan(vlan(10, dc2.id)).await.unwrap();

        inventory.addressing.delete_l2domain(dc1.id).await.unwrap();

        let left = inventory.addressing.list_vlans(0).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0]["l2domain"], dc2.id.to_string());

        // A domain without VLANs deletes cleanly
        let empty = domain(&inventory, "DC3").await;
        inventory.addressing.delete_l2domain(empty.id).await.unwrap();

        let err = inventory.addressing.delete_l2domain(empty.id).await.unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[tokio::test]
    async fn test_update_vlan_keeps_domain() {
        let inventory = Inventory::in_memory();
        let dc1 = domain(&inventory, "DC1").await;
        let dc2 = domain(&inventory, "DC2").await;
        let created = inventory.addressing.create_vlan(vlan(10, dc1.id)).await.unwrap();
        inventory.addressing.create_vlan(vlan(11, dc1.id)).await.unwrap();

        let outcome = inventory
            .addressing
            .update_vlan(created.id, &Patch::new().set("l2domain", dc2.id))
            .await
            .unwrap();
        assert!(!outcome.is_changed());
        assert_eq!(outcome.record.l2domain, Some(dc1.id));

        let err = inventory
            .addressing
            .update_vlan(created.id, &Patch::new().set("number", 11))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "already_exists");
    }

    #[tokio::test]
    async fn test_vrf_delete_guard() {
        let inventory = Inventory::in_memory();
        let vrf = inventory.addressing.create_vrf(Vrf::named("CUST-A")).await.unwrap();
        let mut lag = crate::domain::InterfaceLag::named("ae0");
        lag.vrf = Some(vrf.id);
        inventory.interfaces.create_lag(lag).await.unwrap();

        let err = inventory.addressing.delete_vrf(vrf.id).await.unwrap_err();
        assert_eq!(err.kind(), "domain");
    }
}
