// Copyright (c) 2025 - Cowboy AI, Inc.
//! Enumerated Attribute Vocabulary
//!
//! Every literal-valued field of the inventory records is modelled as a
//! closed enum (or a validated newtype for numeric literal sets). Unknown
//! values fail deserialization, which the facades surface as a
//! validation error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Network segment a device belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeviceGroup {
    #[default]
    #[serde(rename = "mpls")]
    Mpls,
    #[serde(rename = "metro ethernet")]
    MetroEthernet,
    #[serde(rename = "fabric")]
    Fabric,
}

/// Administrative state of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Enable,
    #[default]
    Disable,
}

/// Operating system family running on a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OsType {
    #[serde(rename = "linux")]
    Linux,
    #[serde(rename = "windows")]
    Windows,
    #[serde(rename = "cisco")]
    Cisco,
    #[serde(rename = "nokia")]
    Nokia,
    #[serde(rename = "huawei")]
    Huawei,
    #[serde(rename = "freeBSD")]
    FreeBsd,
    #[default]
    #[serde(rename = "outros", alias = "other")]
    Other,
}

/// Management access protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    #[default]
    Ssh,
    Telnet,
    Http,
    Https,
    Tl1,
    #[serde(rename = "sshkey")]
    SshKey,
}

/// Monitoring probe kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitoringType {
    Snmp,
    #[default]
    Icmp,
    Http,
}

/// SNMP protocol version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SnmpVersion {
    #[serde(rename = "v1")]
    V1,
    #[default]
    #[serde(rename = "v2", alias = "v2c")]
    V2,
    #[serde(rename = "v3")]
    V3,
}

/// Switchport mode of an interface or LAG
///
/// `Unknown` is only meaningful for member interfaces of a LAG, which is
/// the mode an interface is reset to when attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceMode {
    Hybrid,
    Tag,
    #[default]
    Untag,
    Unknown,
}

/// Whether a physical interface stands alone or is bound into a LAG
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceKind {
    #[default]
    Single,
    Lag,
}

/// Role of a link in the MPLS topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OperationType {
    #[serde(rename = "p2p-ce")]
    P2pCe,
    #[serde(rename = "p2p-p")]
    P2pP,
    #[default]
    #[serde(rename = "p2p-pe")]
    P2pPe,
}

/// Speed of a physical interface in Gbit/s (10, 40 or 100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PortSpeed(u32);

impl PortSpeed {
    /// Accepted speeds
    pub const ALLOWED: [u32; 3] = [10, 40, 100];

    /// Validate a port speed
    pub fn new(speed: u32) -> Result<Self, String> {
        if Self::ALLOWED.contains(&speed) {
            Ok(Self(speed))
        } else {
            Err(format!("invalid port speed {speed}, expected one of {:?}", Self::ALLOWED))
        }
    }

    /// Speed in Gbit/s
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for PortSpeed {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<u32> for PortSpeed {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PortSpeed> for u32 {
    fn from(value: PortSpeed) -> Self {
        value.0
    }
}

/// Aggregate speed of a LAG in Gbit/s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct LagSpeed(u32);

impl LagSpeed {
    /// Accepted aggregate speeds
    pub const ALLOWED: [u32; 9] = [10, 20, 40, 80, 100, 200, 300, 400, 800];

    /// Validate a LAG speed
    pub fn new(speed: u32) -> Result<Self, String> {
        if Self::ALLOWED.contains(&speed) {
            Ok(Self(speed))
        } else {
            Err(format!("invalid lag speed {speed}, expected one of {:?}", Self::ALLOWED))
        }
    }

    /// Speed in Gbit/s
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for LagSpeed {
    fn default() -> Self {
        Self(20)
    }
}

impl TryFrom<u32> for LagSpeed {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LagSpeed> for u32 {
    fn from(value: LagSpeed) -> Self {
        value.0
    }
}

/// Service kind carried by a circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CircuitType {
    #[serde(rename = "vpn-l2")]
    VpnL2,
    #[serde(rename = "vpn-l3")]
    VpnL3,
    #[serde(rename = "pw")]
    Pseudowire,
    #[serde(rename = "vsi")]
    Vsi,
    #[default]
    #[serde(rename = "other")]
    Other,
}

/// Criticality level of a circuit (0 lowest, 5 highest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Criticality(u8);

impl Criticality {
    /// Highest criticality level
    pub const MAX: u8 = 5;

    /// Validate a criticality level
    pub fn new(level: u8) -> Result<Self, String> {
        if level > Self::MAX {
            return Err(format!("invalid criticality {level}, expected 0-{}", Self::MAX));
        }
        Ok(Self(level))
    }

    /// Level value
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Criticality {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Criticality> for u8 {
    fn from(value: Criticality) -> Self {
        value.0
    }
}

/// Signalling kind of a tunnel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TunnelType {
    #[default]
    Static,
    Dynamic,
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceKind::Single => write!(f, "single"),
            InterfaceKind::Lag => write!(f, "lag"),
        }
    }
}
