// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Domain Models
//!
//! Records for every entity of the network inventory, plus the value
//! objects and pure invariants they are validated with.
//!
//! # Value Objects with Invariants
//!
//! - [`IpAddressWithCidr`] - IPv4/IPv6 with optional CIDR prefix
//! - [`VlanNumber`] - VLAN number (1-4095)
//! - [`VlanRange`] - half-open bulk range (2-4094)
//! - [`Mtu`] - Maximum Transmission Unit (68-9216 bytes)
//!
//! # Records
//!
//! - Facilities: [`Location`], [`Vendor`]
//! - Devices: [`Device`] with its OS/access/monitoring blocks
//! - Interfaces: [`InterfaceSingle`], [`InterfaceLag`]
//! - Addressing: [`Vrf`], [`L2Domain`], [`Vlan`]
//! - Topology: [`Circuit`], [`Path`], [`Tunnel`], [`TunnelTrafficPolicy`]
//!
//! # Domain Relationships
//!
//! References are stored as ids and resolved on demand by the store:
//! - Device → Location, Vendor
//! - InterfaceSingle → Device, InterfaceLag, Vrf, Vlan*
//! - InterfaceLag → Vrf, Vlan*
//! - L2Domain → Location; Vlan → L2Domain
//! - Circuit → InterfaceSingle | InterfaceLag (per side), TunnelTrafficPolicy
//! - Path → Device (20 hops); Tunnel → Path (4); TunnelTrafficPolicy → Tunnel (5)

pub mod addressing;
pub mod attributes;
pub mod device;
pub mod facilities;
pub mod interface;
pub mod invariants;
pub mod network;
pub mod topology;

pub use addressing::{BgpConfig, L2Domain, OspfConfig, StaticRoute, Vlan, Vrf, RANGE_DESCRIPTION};
pub use attributes::{
    AccessType, CircuitType, Criticality, DeviceGroup, DeviceStatus, InterfaceKind, InterfaceMode,
    LagSpeed, MonitoringType, OperationType, OsType, PortSpeed, SnmpVersion, TunnelType,
};
pub use device::{AccessConfig, Device, MonitoringConfig, OsConfig};
pub use facilities::{Location, LocationAccess, Vendor};
pub use interface::{InterfaceLag, InterfaceSingle};
pub use invariants::{Endpoint, Side, ValidationError, ValidationResult};
pub use network::{IpAddressWithCidr, Mtu, NetworkError, VlanNumber, VlanRange};
pub use topology::{path_name, Circuit, Path, Tunnel, TunnelTrafficPolicy, PATH_PREFIX};
