// Copyright (c) 2025 - Cowboy AI, Inc.
//! Circuits, Paths, Tunnels and Traffic Policies
//!
//! Higher-level topology objects composed from interfaces, LAGs and
//! devices:
//!
//! ```text
//! TunnelTrafficPolicy ─ step_1..step_5 ──→ Tunnel
//! Tunnel ─ path_{primary,secondary}_{src,dst} ──→ Path
//! Path ─ step_1..step_20 ──→ Device
//! Circuit ─ {interface,lag}_{src,dst} ──→ InterfaceSingle | InterfaceLag
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::attributes::{CircuitType, Criticality, TunnelType};
use super::network::Mtu;
use crate::store::{Collection, Document};

/// Prefix given to every path name
pub const PATH_PREFIX: &str = "PATH-";

/// Provisioned connection between two interface or LAG endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Circuit {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub designation: Option<String>,
    pub project: Option<String>,
    pub owner_group: Option<String>,
    pub interface_src: Option<Uuid>,
    pub interface_dst: Option<Uuid>,
    pub lag_src: Option<Uuid>,
    pub lag_dst: Option<Uuid>,
    pub bind_policy: Option<Uuid>,
    pub vc_id: Option<i64>,
    pub vc_type: Option<String>,
    pub vlan_tag: Option<String>,
    #[serde(default)]
    pub bandwidth_reservation: i64,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub criticality_matrix: Criticality,
    #[serde(rename = "type", default)]
    pub kind: CircuitType,
    #[serde(default)]
    pub mtu: Mtu,
    #[serde(default)]
    pub alarm: bool,
    #[serde(default)]
    pub info: Map<String, Value>,
    #[serde(default)]
    pub options: Map<String, Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Circuit {
    /// Circuit with a name and no endpoints
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            alias: None,
            description: None,
            designation: None,
            project: None,
            owner_group: None,
            interface_src: None,
            interface_dst: None,
            lag_src: None,
            lag_dst: None,
            bind_policy: None,
            vc_id: None,
            vc_type: None,
            vlan_tag: None,
            bandwidth_reservation: 0,
            status: false,
            criticality_matrix: Criticality::default(),
            kind: CircuitType::default(),
            mtu: Mtu::default(),
            alarm: false,
            info: Map::new(),
            options: Map::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl Document for Circuit {
    const COLLECTION: Collection = Collection::Circuits;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Ordered list of up to twenty device hops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Path {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub step_1: Option<Uuid>,
    pub step_2: Option<Uuid>,
    pub step_3: Option<Uuid>,
    pub step_4: Option<Uuid>,
    pub step_5: Option<Uuid>,
    pub step_6: Option<Uuid>,
    pub step_7: Option<Uuid>,
    pub step_8: Option<Uuid>,
    pub step_9: Option<Uuid>,
    pub step_10: Option<Uuid>,
    pub step_11: Option<Uuid>,
    pub step_12: Option<Uuid>,
    pub step_13: Option<Uuid>,
    pub step_14: Option<Uuid>,
    pub step_15: Option<Uuid>,
    pub step_16: Option<Uuid>,
    pub step_17: Option<Uuid>,
    pub step_18: Option<Uuid>,
    pub step_19: Option<Uuid>,
    pub step_20: Option<Uuid>,
    #[serde(default)]
    pub alarm: bool,
    #[serde(default)]
    pub info: Map<String, Value>,
    #[serde(default)]
    pub options: Map<String, Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Path {
    /// Path with a name and the given leading hops
    pub fn with_hops(name: impl Into<String>, hops: &[Uuid]) -> Self {
        let mut steps = [None; 20];
        for (slot, hop) in steps.iter_mut().zip(hops) {
            *slot = Some(*hop);
        }
        let [s1, s2, s3, s4, s5, s6, s7, s8, s9, s10, s11, s12, s13, s14, s15, s16, s17, s18, s19, s20] =
            steps;
        Self {
            id: Uuid::nil(),
            name: name.into(),
            alias: None,
            description: None,
            step_1: s1,
            step_2: s2,
            step_3: s3,
            step_4: s4,
            step_5: s5,
            step_6: s6,
            step_7: s7,
            step_8: s8,
            step_9: s9,
            step_10: s10,
            step_11: s11,
            step_12: s12,
            step_13: s13,
            step_14: s14,
            step_15: s15,
            step_16: s16,
            step_17: s17,
            step_18: s18,
            step_19: s19,
            step_20: s20,
            alarm: false,
            info: Map::new(),
            options: Map::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Hop slots in order, including empty ones
    pub fn steps(&self) -> [Option<Uuid>; 20] {
        [
            self.step_1,
            self.step_2,
            self.step_3,
            self.step_4,
            self.step_5,
            self.step_6,
            self.step_7,
            self.step_8,
            self.step_9,
            self.step_10,
            self.step_11,
            self.step_12,
            self.step_13,
            self.step_14,
            self.step_15,
            self.step_16,
            self.step_17,
            self.step_18,
            self.step_19,
            self.step_20,
        ]
    }

    /// Devices referenced by the path, in hop order
    pub fn hops(&self) -> Vec<Uuid> {
        self.steps().into_iter().flatten().collect()
    }
}

/// Canonical persisted name of a path: `PATH-` prefix, uppercased
pub fn path_name(name: &str) -> String {
    format!("{PATH_PREFIX}{name}").to_uppercase()
}

impl Document for Path {
    const COLLECTION: Collection = Collection::Paths;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Logical connection over primary and secondary paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tunnel {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub tunnel_id: Option<i64>,
    #[serde(default)]
    pub tunnel_type: TunnelType,
    #[serde(default)]
    pub status: bool,
    pub path_primary_src: Option<Uuid>,
    pub path_secondary_src: Option<Uuid>,
    pub path_primary_dst: Option<Uuid>,
    pub path_secondary_dst: Option<Uuid>,
    #[serde(default)]
    pub alarm: bool,
    #[serde(default)]
    pub info: Map<String, Value>,
    #[serde(default)]
    pub options: Map<String, Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Tunnel {
    /// Tunnel with a name and no paths
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            alias: None,
            description: None,
            tunnel_id: None,
            tunnel_type: TunnelType::default(),
            status: false,
            path_primary_src: None,
            path_secondary_src: None,
            path_primary_dst: None,
            path_secondary_dst: None,
            alarm: false,
            info: Map::new(),
            options: Map::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Referenced paths
    pub fn paths(&self) -> Vec<Uuid> {
        [
            self.path_primary_src,
            self.path_secondary_src,
            self.path_primary_dst,
            self.path_secondary_dst,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Document for Tunnel {
    const COLLECTION: Collection = Collection::Tunnels;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Ordered preference list of up to five tunnels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TunnelTrafficPolicy {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    pub step_1: Option<Uuid>,
    pub step_2: Option<Uuid>,
    pub step_3: Option<Uuid>,
    pub step_4: Option<Uuid>,
    pub step_5: Option<Uuid>,
    #[serde(default)]
    pub alarm: bool,
    #[serde(default)]
    pub info: Map<String, Value>,
    #[serde(default)]
    pub options: Map<String, Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TunnelTrafficPolicy {
    /// Policy with a name and the given tunnels in order
    pub fn with_tunnels(name: impl Into<String>, tunnels: &[Uuid]) -> Self {
        let mut steps = [None; 5];
        for (slot, tunnel) in steps.iter_mut().zip(tunnels) {
            *slot = Some(*tunnel);
        }
        let [s1, s2, s3, s4, s5] = steps;
        Self {
            id: Uuid::nil(),
            name: name.into(),
            alias: None,
            description: None,
            step_1: s1,
            step_2: s2,
            step_3: s3,
            step_4: s4,
            step_5: s5,
            alarm: false,
            info: Map::new(),
            options: Map::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Referenced tunnels, in order
    pub fn tunnels(&self) -> Vec<Uuid> {
        [self.step_1, self.step_2, self.step_3, self.step_4, self.step_5]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl Document for TunnelTrafficPolicy {
    const COLLECTION: Collection = Collection::TrafficPolicies;

    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_name_is_prefixed_and_uppercased() {
        assert_eq!(path_name("core"), "PATH-CORE");
        assert_eq!(path_name("Poa-Sp"), "PATH-POA-SP");
    }

    #[test]
    fn test_path_hops_skip_empty_slots() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let mut path = Path::with_hops("core", &[a]);
        path.step_5 = Some(b);
        assert_eq!(path.hops(), vec![a, b]);
        assert_eq!(path.steps()[0], Some(a));
        assert_eq!(path.steps()[1], None);
    }

    #[test]
    fn test_circuit_defaults() {
        let circuit: Circuit = serde_json::from_value(json!({"name": "C1"})).unwrap();
        assert_eq!(circuit.kind, CircuitType::Other);
        assert_eq!(circuit.criticality_matrix.value(), 0);
        assert_eq!(circuit.mtu.value(), 1500);

        let result = serde_json::from_value::<Circuit>(json!({"name": "C1", "type": "mpls"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_policy_tunnels_in_order() {
        let t1 = Uuid::now_v7();
        let t2 = Uuid::now_v7();
        let policy = TunnelTrafficPolicy::with_tunnels("gold", &[t1, t2]);
        assert_eq!(policy.tunnels(), vec![t1, t2]);
        assert_eq!(policy.step_3, None);
    }
}
