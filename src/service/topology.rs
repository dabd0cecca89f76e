// Copyright (c) 2025 - Cowboy AI, Inc.
//! Circuits, paths, tunnels and tunnel traffic policies

use serde_json::Value;
use std::collections::BTreeSet;
use tracing::info;
use uuid::Uuid;

use super::{
    delete_or_not_found, ensure_all_exist, ensure_exists, guard_unreferenced, view_all,
    Repositories, ServiceOptions,
};
use crate::domain::invariants::{circuit_endpoint, validate_distinct_devices, Endpoint, Side};
use crate::domain::{path_name, Circuit, Path, Tunnel, TunnelTrafficPolicy};
use crate::errors::InventoryResult;
use crate::store::{Collection, Filter, Patch, UpdateOutcome, POLICY_STEPS, TUNNEL_PATHS};

/// Circuit fields that select the endpoints
const ENDPOINT_FIELDS: [&str; 4] = ["interface_src", "interface_dst", "lag_src", "lag_dst"];

/// Facade over the topology composer
#[derive(Clone)]
pub struct TopologyService {
    repos: Repositories,
    options: ServiceOptions,
}

impl TopologyService {
    pub fn new(repos: Repositories, options: ServiceOptions) -> Self {
        Self { repos, options }
    }

    /// Devices an endpoint lands on
    ///
    /// An interface gives its own device; a LAG gives the devices of its
    /// members.
    async fn endpoint_devices(&self, endpoint: Endpoint) -> InventoryResult<BTreeSet<Uuid>> {
        match endpoint {
            Endpoint::Interface(id) => {
                let interface = self.repos.interfaces.require(id).await?;
                Ok(interface.device.into_iter().collect())
            }
            Endpoint::Lag(id) => {
                self.repos.lags.require(id).await?;
                let members = self
                    .repos
                    .interfaces
                    .find(&Filter::new().eq("lag", id.to_string()))
                    .await?;
                Ok(members.into_iter().filter_map(|member| member.device).collect())
            }
        }
    }

    async fn validate_circuit(&self, circuit: &Circuit) -> InventoryResult<()> {
        let source = circuit_endpoint(Side::Source, circuit.interface_src, circuit.lag_src)?;
        let destination =
            circuit_endpoint(Side::Destination, circuit.interface_dst, circuit.lag_dst)?;

        let source = self.endpoint_devices(source).await?;
        let destination = self.endpoint_devices(destination).await?;
        validate_distinct_devices(&source, &destination)?;

        ensure_exists(&self.repos.policies, circuit.bind_policy).await
    }

    // Circuits

    pub async fn create_circuit(&self, circuit: Circuit) -> InventoryResult<Circuit> {
        self.validate_circuit(&circuit).await?;
        let circuit = self.repos.circuits.insert(&circuit).await?;
        info!(circuit_id = %circuit.id, name = %circuit.name, "Created circuit");
        Ok(circuit)
    }

    pub async fn get_circuit(&self, id: Uuid, depth: u8) -> InventoryResult<Value> {
        self.repos.circuits.view(id, depth).await
    }

    pub async fn list_circuits(&self, depth: u8) -> InventoryResult<Vec<Value>> {
        view_all(&self.repos.circuits, depth).await
    }

    /// Partial update; endpoints are revalidated when any of them changes
    pub async fn update_circuit(
        &self,
        id: Uuid,
        patch: &Patch,
    ) -> InventoryResult<UpdateOutcome<Circuit>> {
        let (current, merged) = self.repos.circuits.preview(id, patch).await?;
        if ENDPOINT_FIELDS.iter().any(|field| patch.contains(field)) {
            self.validate_circuit(&merged).await?;
        } else if merged.bind_policy != current.bind_policy {
            ensure_exists(&self.repos.policies, merged.bind_policy).await?;
        }
        self.repos.circuits.update(id, patch).await
    }

    pub async fn delete_circuit(&self, id: Uuid) -> InventoryResult<()> {
        delete_or_not_found(&self.repos.circuits, id).await?;
        info!(circuit_id = %id, "Deleted circuit");
        Ok(())
    }

    // Paths

    /// Create a path; its name is stored as `PATH-{NAME}`
    pub async fn create_path(&self, mut path: Path) -> InventoryResult<Path> {
        ensure_all_exist(&self.repos.devices, path.hops()).await?;
        path.name = path_name(&path.name);
        let path = self.repos.paths.insert(&path).await?;
        info!(path_id = %path.id, name = %path.name, hops = path.hops().len(), "Created path");
        Ok(path)
    }

    pub async fn get_path(&self, id: Uuid, depth: u8) -> InventoryResult<Value> {
        self.repos.paths.view(id, depth).await
    }

    pub async fn list_paths(&self, depth: u8) -> InventoryResult<Vec<Value>> {
        view_all(&self.repos.paths, depth).await
    }

    /// Paths whose first hop is `device_id`; later hops are not searched
    pub async fn paths_by_device(&self, device_id: Uuid, depth: u8) -> InventoryResult<Vec<Value>> {
        let paths = self
            .repos
            .paths
            .find(&Filter::new().eq("step_1", device_id.to_string()))
            .await?;
        self.repos.paths.view_records(&paths, depth).await
    }

    /// Partial update; a new name is prefixed like on create
    pub async fn update_path(&self, id: Uuid, patch: &Patch) -> InventoryResult<UpdateOutcome<Path>> {
        let mut patch = patch.clone();
        if let Some(name) = patch.get("name").and_then(Value::as_str).map(path_name) {
            patch = patch.set("name", name);
        }

        let (current, merged) = self.repos.paths.preview(id, &patch).await?;
        let known = current.hops();
        let added: Vec<Uuid> = merged
            .hops()
            .into_iter()
            .filter(|hop| !known.contains(hop))
            .collect();
        ensure_all_exist(&self.repos.devices, added).await?;

        self.repos.paths.update(id, &patch).await
    }

    pub async fn delete_path(&self, id: Uuid) -> InventoryResult<()> {
        if self.options.guard_deletes {
            let store = self.repos.paths.store().as_ref();
            guard_unreferenced(store, Collection::Paths, id, Collection::Tunnels, &TUNNEL_PATHS)
                .await?;
        }
        delete_or_not_found(&self.repos.paths, id).await?;
        info!(path_id = %id, "Deleted path");
        Ok(())
    }

    // Tunnels

    pub async fn create_tunnel(&self, tunnel: Tunnel) -> InventoryResult<Tunnel> {
        ensure_all_exist(&self.repos.paths, tunnel.paths()).await?;
        let tunnel = self.repos.tunnels.insert(&tunnel).await?;
        info!(tunnel_id = %tunnel.id, name = %tunnel.name, "Created tunnel");
        Ok(tunnel)
    }

    pub async fn get_tunnel(&self, id: Uuid, depth: u8) -> InventoryResult<Value> {
        self.repos.tunnels.view(id, depth).await
    }

    pub async fn list_tunnels(&self, depth: u8) -> InventoryResult<Vec<Value>> {
        view_all(&self.repos.tunnels, depth).await
    }

    pub async fn update_tunnel(
        &self,
        id: Uuid,
        patch: &Patch,
    ) -> InventoryResult<UpdateOutcome<Tunnel>> {
        let (_, merged) = self.repos.tunnels.preview(id, patch).await?;
        ensure_all_exist(&self.repos.paths, merged.paths()).await?;
        self.repos.tunnels.update(id, patch).await
    }

    pub async fn delete_tunnel(&self, id: Uuid) -> InventoryResult<()> {
        if self.options.guard_deletes {
            let store = self.repos.tunnels.store().as_ref();
            guard_unreferenced(store, Collection::Tunnels, id, Collection::TrafficPolicies, &POLICY_STEPS)
                .await?;
        }
        delete_or_not_found(&self.repos.tunnels, id).await?;
        info!(tunnel_id = %id, "Deleted tunnel");
        Ok(())
    }

    // Tunnel traffic policies

    pub async fn create_policy(
        &self,
        policy: TunnelTrafficPolicy,
    ) -> InventoryResult<TunnelTrafficPolicy> {
        ensure_all_exist(&self.repos.tunnels, policy.tunnels()).await?;
        let policy = self.repos.policies.insert(&policy).await?;
        info!(policy_id = %policy.id, name = %policy.name, "Created tunnel traffic policy");
        Ok(policy)
    }

    pub async fn get_policy(&self, id: Uuid, depth: u8) -> InventoryResult<Value> {
        self.repos.policies.view(id, depth).await
    }

    pub async fn list_policies(&self, depth: u8) -> InventoryResult<Vec<Value>> {
        view_all(&self.repos.policies, depth).await
    }

    pub async fn update_policy(
        &self,
        id: Uuid,
        patch: &Patch,
    ) -> InventoryResult<UpdateOutcome<TunnelTrafficPolicy>> {
        let (_, merged) = self.repos.policies.preview(id, patch).await?;
        ensure_all_exist(&self.repos.tunnels, merged.tunnels()).await?;
        self.repos.policies.update(id, patch).await
    }

    pub async fn delete_policy(&self, id: Uuid) -> InventoryResult<()> {
        delete_or_not_found(&self.repos.policies, id).await?;
        info!(policy_id = %id, "Deleted tunnel traffic policy");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Device, InterfaceLag, InterfaceSingle};
    use crate::errors::InventoryError;
    use crate::service::Inventory;

    struct Fixture {
        inventory: Inventory,
        r1: Uuid,
        r2: Uuid,
        r1_port: Uuid,
        r1_other_port: Uuid,
        r2_port: Uuid,
    }

    async fn fixture() -> Fixture {
        let inventory = Inventory::in_memory();
        let mut ids = Vec::new();
        for name in ["R1", "R2"] {
            let device = inventory
                .devices
                .create_device(Device::new(name, None))
                .await
                .unwrap();
            ids.push(device.id);
        }
        let mut ports = Vec::new();
        for (device, name) in [(ids[0], "ge-0/0/1"), (ids[0], "ge-0/0/2"), (ids[1], "ge-0/0/1")] {
            let port = inventory
                .interfaces
                .create_interface_on_device(device, InterfaceSingle::named(name))
                .await
                .unwrap();
            ports.push(port.id);
        }
        Fixture {
            inventory,
            r1: ids[0],
            r2: ids[1],
            r1_port: ports[0],
            r1_other_port: ports[1],
            r2_port: ports[2],
        }
    }

    fn circuit(src: Uuid, dst: Uuid) -> Circuit {
        let mut circuit = Circuit::named("C1");
        circuit.interface_src = Some(src);
        circuit.interface_dst = Some(dst);
        circuit
    }

    #[tokio::test]
    async fn test_circuit_between_devices() {
        let f = fixture().await;
        let created = f
            .inventory
            .topology
            .create_circuit(circuit(f.r1_port, f.r2_port))
            .await
            .unwrap();
        assert!(created.created_at.is_some());
        assert!(created.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_circuit_on_one_device_is_rejected() {
        let f = fixture().await;
        let err = f
            .inventory
            .topology
            .create_circuit(circuit(f.r1_port, f.r1_other_port))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[tokio::test]
    async fn test_circuit_side_needs_exactly_one_endpoint() {
        let f = fixture().await;
        let lag = f
            .inventory
            .interfaces
            .create_lag_from_interface(f.r2_port, InterfaceLag::named("ae0"))
            .await
            .unwrap();

        let mut both = circuit(f.r1_port, f.r2_port);
        both.lag_dst = Some(lag.id);
        let err = f.inventory.topology.create_circuit(both).await.unwrap_err();
        assert_eq!(err.kind(), "validation");

        let mut neither = circuit(f.r1_port, f.r2_port);
        neither.interface_dst = None;
        let err = f.inventory.topology.create_circuit(neither).await.unwrap_err();
        assert_eq!(err.kind(), "validation");

        let mut via_lag = circuit(f.r1_port, f.r2_port);
        via_lag.interface_dst = None;
        via_lag.lag_dst = Some(lag.id);
        f.inventory.topology.create_circuit(via_lag).await.unwrap();
    }

    #[tokio::test]
    async fn test_circuit_update_revalidates_endpoints() {
        let f = fixture().await;
        let created = f
            .inventory
            .topology
            .create_circuit(circuit(f.r1_port, f.r2_port))
            .await
            .unwrap();
        let err = f
            .inventory
            .topology
            .update_circuit(created.id, &Patch::new().set("interface_dst", f.r1_other_port))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[tokio::test]
    async fn test_path_name_and_first_hop_lookup() {
        let f = fixture().await;
        let path = f
            .inventory
            .topology
            .create_path(Path::with_hops("core", &[f.r1, f.r2]))
            .await
            .unwrap();
        assert_eq!(path.name, "PATH-CORE");

        assert_eq!(f.inventory.topology.paths_by_device(f.r1, 0).await.unwrap().len(), 1);
        // Only the first hop is searched
        assert!(f.inventory.topology.paths_by_device(f.r2, 0).await.unwrap().is_empty());

        let outcome = f
            .inventory
            .topology
            .update_path(path.id, &Patch::new().set("name", "edge"))
            .await
            .unwrap();
        assert_eq!(outcome.record.name, "PATH-EDGE");
    }

    #[tokio::test]
    async fn test_path_with_unknown_hop() {
        let f = fixture().await;
        let err = f
            .inventory
            .topology
            .create_path(Path::with_hops("core", &[f.r1, Uuid::now_v7()]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[tokio::test]
    async fn test_tunnel_and_policy_guards() {
        let f = fixture().await;
        let path = f
            .inventory
            .topology
            .create_path(Path::with_hops("core", &[f.r1, f.r2]))
            .await
            .unwrap();
        let mut tunnel = Tunnel::named("T1");
        tunnel.path_primary_src = Some(path.id);
        let tunnel = f.inventory.topology.create_tunnel(tunnel).await.unwrap();
        let policy = f
            .inventory
            .topology
            .create_policy(TunnelTrafficPolicy::with_tunnels("P1", &[tunnel.id]))
            .await
            .unwrap();

        let err = f.inventory.topology.delete_path(path.id).await.unwrap_err();
        assert!(matches!(err, InventoryError::Domain(_)));
        let err = f.inventory.topology.delete_tunnel(tunnel.id).await.unwrap_err();
        assert!(matches!(err, InventoryError::Domain(_)));

        f.inventory.topology.delete_policy(policy.id).await.unwrap();
        f.inventory.topology.delete_tunnel(tunnel.id).await.unwrap();
        f.inventory.topology.delete_path(path.id).await.unwrap();
    }
}
