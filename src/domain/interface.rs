// Copyright (c) 2025 - Cowboy AI, Inc.
//! Physical interfaces and link aggregation groups

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::attributes::{InterfaceKind, InterfaceMode, LagSpeed, OperationType, PortSpeed};
use super::network::{IpAddressWithCidr, Mtu};
use crate::store::{Collection, Document};

fn unknown_mode() -> InterfaceMode {
    InterfaceMode::Unknown
}

fn ce_operation() -> OperationType {
    OperationType::P2pCe
}

/// Physical port of a device
///
/// `lag` set means the interface is a LAG member; its own addressing
/// (`ipaddr`, `vrf`, `vlan`) is then cleared and carried by the LAG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceSingle {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub status_op: bool,
    #[serde(default = "unknown_mode")]
    pub mode: InterfaceMode,
    #[serde(rename = "type", default)]
    pub kind: InterfaceKind,
    #[serde(default)]
    pub speed: PortSpeed,
    #[serde(default)]
    pub mtu: Mtu,
    #[serde(default = "ce_operation")]
    pub operation_type: OperationType,
    pub vrf: Option<Uuid>,
    #[serde(default)]
    pub vlan: Vec<Uuid>,
    pub ipaddr: Option<IpAddressWithCidr>,
    pub device: Option<Uuid>,
    pub lag: Option<Uuid>,
    #[serde(default)]
    pub alarm: bool,
    #[serde(default)]
    pub info: Map<String, Value>,
}

impl InterfaceSingle {
    /// Unbound interface with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            alias: None,
            description: None,
            status: false,
            status_op: false,
            mode: unknown_mode(),
            kind: InterfaceKind::Single,
            speed: PortSpeed::default(),
            mtu: Mtu::default(),
            operation_type: ce_operation(),
            vrf: None,
            vlan: Vec::new(),
            ipaddr: None,
            device: None,
            lag: None,
            alarm: false,
            info: Map::new(),
        }
    }

    /// Whether the interface is bound into a LAG
    pub fn is_lag_member(&self) -> bool {
        self.lag.is_some()
    }
}

impl Document for InterfaceSingle {
    const COLLECTION: Collection = Collection::Interfaces;

    fn id(&self) -> Uuid {
        self.id
    }
}

fn pe_operation() -> OperationType {
    OperationType::P2pPe
}

/// Link aggregation group
///
/// Members are not stored on the LAG: they are the interfaces whose `lag`
/// points here, exposed as the `interface` back-link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceLag {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub mode: InterfaceMode,
    #[serde(default)]
    pub speed: LagSpeed,
    #[serde(default)]
    pub mtu: Mtu,
    #[serde(default = "pe_operation")]
    pub operation_type: OperationType,
    pub vrf: Option<Uuid>,
    #[serde(default)]
    pub vlan: Vec<Uuid>,
    pub ipaddr: Option<IpAddressWithCidr>,
    #[serde(default)]
    pub alarm: bool,
    #[serde(default)]
    pub info: Map<String, Value>,
}

impl InterfaceLag {
    /// LAG with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            alias: None,
            description: None,
            status: false,
            mode: InterfaceMode::default(),
            speed: LagSpeed::default(),
            mtu: Mtu::default(),
            operation_type: pe_operation(),
            vrf: None,
            vlan: Vec::new(),
            ipaddr: None,
            alarm: false,
            info: Map::new(),
        }
    }
}

impl Document for InterfaceLag {
    const COLLECTION: Collection = Collection::Lags;

    fn id(&self) -> Uuid {
        self.id
    }
}
