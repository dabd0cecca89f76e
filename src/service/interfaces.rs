// Copyright (c) 2025 - Cowboy AI, Inc.
//! Physical interfaces and LAGs
//!
//! LAG membership changes go through the [`Membership`] state machine so
//! the bound defaults are applied the same way whether an interface is
//! attached explicitly, created inside a LAG, or used to seed a new LAG.
//! An interface document is written in one replace, so it is never
//! observed half-updated.

use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{info, warn};
use uuid::Uuid;

use super::{delete_or_not_found, ensure_all_exist, ensure_exists, view_all, Repositories};
use crate::domain::{InterfaceLag, InterfaceSingle};
use crate::errors::{InventoryError, InventoryResult};
use crate::state_machine::lag_membership::{
    apply_effect, Membership, MembershipCommand, MembershipEffect,
};
use crate::state_machine::StateMachine;
use crate::store::{Filter, Patch, UpdateOutcome};

/// Facade over physical interfaces and LAGs
#[derive(Clone)]
pub struct InterfaceService {
    repos: Repositories,
}

impl InterfaceService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    async fn ensure_addressing(&self, vrf: Option<Uuid>, vlans: &[Uuid]) -> InventoryResult<()> {
        ensure_exists(&self.repos.vrfs, vrf).await?;
        ensure_all_exist(&self.repos.vlans, vlans.iter().copied()).await
    }

    /// Run a membership command against an interface record
    fn transition(
        interface: &mut InterfaceSingle,
        command: MembershipCommand,
    ) -> InventoryResult<MembershipEffect> {
        let (_, effect) = Membership::of(interface).transition(&command)?;
        apply_effect(interface, effect);
        Ok(effect)
    }

    // Physical interfaces

    /// Create an interface; a `lag` given up front binds it immediately
    pub async fn create_interface(
        &self,
        mut interface: InterfaceSingle,
    ) -> InventoryResult<InterfaceSingle> {
        ensure_exists(&self.repos.devices, interface.device).await?;
        if let Some(lag) = interface.lag.take() {
            ensure_exists(&self.repos.lags, Some(lag)).await?;
            Self::transition(&mut interface, MembershipCommand::Attach(lag))?;
        } else {
            self.ensure_addressing(interface.vrf, &interface.vlan).await?;
        }

        let interface = self.repos.interfaces.insert(&interface).await?;
        info!(
            interface_id = %interface.id,
            name = %interface.name,
            device_id = ?interface.device,
            "Created interface"
        );
        Ok(interface)
    }

    /// Create an interface owned by `device_id`
    pub async fn create_interface_on_device(
        &self,
        device_id: Uuid,
        mut interface: InterfaceSingle,
    ) -> InventoryResult<InterfaceSingle> {
        self.repos.devices.require(device_id).await?;
        interface.device = Some(device_id);
        self.create_interface(interface).await
    }

    pub async fn get_interface(&self, id: Uuid, depth: u8) -> InventoryResult<Value> {
        self.repos.interfaces.view(id, depth).await
    }

    pub async fn list_interfaces(&self, depth: u8) -> InventoryResult<Vec<Value>> {
        view_all(&self.repos.interfaces, depth).await
    }

    pub async fn interfaces_by_device(
        &self,
        device_id: Uuid,
        depth: u8,
    ) -> InventoryResult<Vec<Value>> {
        let interfaces = self
            .repos
            .interfaces
            .find(&Filter::new().eq("device", device_id.to_string()))
            .await?;
        self.repos.interfaces.view_records(&interfaces, depth).await
    }

    /// Partial update
    ///
    /// Membership is not patchable (use [`attach`] / [`detach`]), and a LAG
    /// member's addressing stays cleared while it is bound.
    ///
    /// [`attach`]: InterfaceService::attach
    /// [`detach`]: InterfaceService::detach
    pub async fn update_interface(
        &self,
        id: Uuid,
        patch: &Patch,
    ) -> InventoryResult<UpdateOutcome<InterfaceSingle>> {
        let (current, merged) = self.repos.interfaces.preview(id, patch).await?;

        if merged.lag != current.lag {
            return Err(InventoryError::domain(
                "Lag membership cannot be patched, use attach or detach",
            ));
        }
        let readdressed =
            merged.ipaddr != current.ipaddr || merged.vrf != current.vrf || merged.vlan != current.vlan;
        if current.is_lag_member() && readdressed {
            return Err(InventoryError::domain(format!(
                "Interface {id} is a lag member, its addressing belongs to the lag"
            )));
        }

        if merged.device != current.device {
            ensure_exists(&self.repos.devices, merged.device).await?;
        }
        if readdressed {
            self.ensure_addressing(merged.vrf, &merged.vlan).await?;
        }
        self.repos.interfaces.update(id, patch).await
    }

    pub async fn delete_interface(&self, id: Uuid) -> InventoryResult<()> {
        delete_or_not_found(&self.repos.interfaces, id).await?;
        info!(interface_id = %id, "Deleted interface");
        Ok(())
    }

    // Membership

    /// Bind an interface into a LAG, resetting its addressing
    pub async fn attach(&self, interface_id: Uuid, lag_id: Uuid) -> InventoryResult<InterfaceSingle> {
        let mut interface = self.repos.interfaces.require(interface_id).await?;
        self.repos.lags.require(lag_id).await?;

        Self::transition(&mut interface, MembershipCommand::Attach(lag_id))?;
        let interface = self.repos.interfaces.save(&interface).await?;

        info!(%interface_id, %lag_id, "Attached interface to lag");
        Ok(interface)
    }

    /// Release an interface from its LAG; addressing stays as last set
    pub async fn detach(&self, interface_id: Uuid) -> InventoryResult<InterfaceSingle> {
        let mut interface = self.repos.interfaces.require(interface_id).await?;
        let previous = interface.lag;

        Self::transition(&mut interface, MembershipCommand::Detach)?;
        let interface = self.repos.interfaces.save(&interface).await?;

        info!(%interface_id, lag_id = ?previous, "Detached interface from lag");
        Ok(interface)
    }

    // LAGs

    pub async fn create_lag(&self, lag: InterfaceLag) -> InventoryResult<InterfaceLag> {
        self.ensure_addressing(lag.vrf, &lag.vlan).await?;
        let lag = self.repos.lags.insert(&lag).await?;
        info!(lag_id = %lag.id, name = %lag.name, "Created lag");
        Ok(lag)
    }

    /// Create a LAG and bind the seed interface into it
    ///
    /// Two writes: the LAG, then the interface. If the second fails the
    /// LAG exists without members and `Incomplete` is returned.
    pub async fn create_lag_from_interface(
        &self,
        interface_id: Uuid,
        lag: InterfaceLag,
    ) -> InventoryResult<InterfaceLag> {
        let mut interface = self.repos.interfaces.require(interface_id).await?;
        if let Membership::Member(current) = Membership::of(&interface) {
            return Err(InventoryError::domain(format!(
                "Interface {interface_id} already belongs to lag {current}"
            )));
        }

        let lag = self.create_lag(lag).await?;

        let bound = match Self::transition(&mut interface, MembershipCommand::Attach(lag.id)) {
            Ok(_) => self.repos.interfaces.save(&interface).await,
            Err(err) => Err(err),
        };
        if let Err(err) = bound {
            warn!(lag_id = %lag.id, %interface_id, error = %err, "Lag created without its seed interface");
            return Err(InventoryError::Incomplete {
                operation: "create lag from interface".to_string(),
                completed: 1,
                total: 2,
                reason: err.to_string(),
            });
        }

        info!(lag_id = %lag.id, %interface_id, "Seeded lag with interface");
        Ok(lag)
    }

    pub async fn get_lag(&self, id: Uuid, depth: u8) -> InventoryResult<Value> {
        self.repos.lags.view(id, depth).await
    }

    pub async fn list_lags(&self, depth: u8) -> InventoryResult<Vec<Value>> {
        view_all(&self.repos.lags, depth).await
    }

    /// LAGs with at least one member on `device_id`
    pub async fn lags_by_device(&self, device_id: Uuid, depth: u8) -> InventoryResult<Vec<Value>> {
        let lag_ids: BTreeSet<Uuid> = self
            .repos
            .interfaces
            .find(&Filter::new().eq("device", device_id.to_string()))
            .await?
            .into_iter()
            .filter_map(|interface| interface.lag)
            .collect();

        let mut lags = Vec::with_capacity(lag_ids.len());
        for id in lag_ids {
            if let Some(lag) = self.repos.lags.get(id).await? {
                lags.push(lag);
            }
        }
        self.repos.lags.view_records(&lags, depth).await
    }

    pub async fn update_lag(
        &self,
        id: Uuid,
        patch: &Patch,
    ) -> InventoryResult<UpdateOutcome<InterfaceLag>> {
        let (current, merged) = self.repos.lags.preview(id, patch).await?;
        if merged.vrf != current.vrf || merged.vlan != current.vlan {
            self.ensure_addressing(merged.vrf, &merged.vlan).await?;
        }
        self.repos.lags.update(id, patch).await
    }

    /// Detach every member, then remove the LAG
    pub async fn delete_lag(&self, id: Uuid) -> InventoryResult<()> {
        self.repos.lags.require(id).await?;
        let members = self
            .repos
            .interfaces
            .find(&Filter::new().eq("lag", id.to_string()))
            .await?;
        let total = members.len() + 1;

        for (completed, mut member) in members.into_iter().enumerate() {
            let released = match Self::transition(&mut member, MembershipCommand::Detach) {
                Ok(_) => self.repos.interfaces.save(&member).await.map(|_| ()),
                Err(err) => Err(err),
            };
            if let Err(err) = released {
                warn!(lag_id = %id, interface_id = %member.id, error = %err, "Lag delete stopped");
                return Err(InventoryError::Incomplete {
                    operation: "delete lag".to_string(),
                    completed,
                    total,
                    reason: err.to_string(),
                });
            }
        }

        delete_or_not_found(&self.repos.lags, id).await?;
        info!(lag_id = %id, members = total - 1, "Deleted lag");
        Ok(())
    }
}
