// Copyright (c) 2025 - Cowboy AI, Inc.
//! VRFs, L2 domains and VLANs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::network::VlanNumber;
use crate::store::{Collection, Document};

/// BGP session attached to a VRF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BgpConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub asn: Option<u32>,
    pub router_id: Option<String>,
    pub neighbor: Option<String>,
}

/// OSPF process attached to a VRF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OspfConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub router_id: Option<String>,
    pub area: Option<String>,
    pub network: Option<String>,
}

/// Static route of a VRF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticRoute {
    pub name: Option<String>,
    pub description: Option<String>,
    pub network: Option<String>,
    pub next_hop: Option<String>,
}

/// Routing instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vrf {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub rd: Option<String>,
    pub rt_import: Option<String>,
    pub rt_export: Option<String>,
    #[serde(default)]
    pub bgp: Vec<BgpConfig>,
    #[serde(default)]
    pub ospf: Vec<OspfConfig>,
    #[serde(default)]
    pub static_route: Vec<StaticRoute>,
}

impl Vrf {
    /// VRF with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            description: None,
            rd: None,
            rt_import: None,
            rt_export: None,
            bgp: Vec::new(),
            ospf: Vec::new(),
            static_route: Vec::new(),
        }
    }
}

impl Document for Vrf {
    const COLLECTION: Collection = Collection::Vrfs;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// VLAN numbering scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct L2Domain {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<Uuid>,
}

impl L2Domain {
    /// Domain with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            description: None,
            location: None,
        }
    }
}

impl Document for L2Domain {
    const COLLECTION: Collection = Collection::L2Domains;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Numbered layer-2 segment
///
/// `unique = false` scopes the number to the VLAN's L2 domain; `unique =
/// true` claims the number across every domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vlan {
    #[serde(default)]
    pub id: Uuid,
    pub name: Option<String>,
    pub alias: Option<String>,
    pub number: VlanNumber,
    pub description: Option<String>,
    pub l2domain: Option<Uuid>,
    #[serde(default)]
    pub unique: bool,
}

/// Description stamped on VLANs created by a range
pub const RANGE_DESCRIPTION: &str = "Criado automaticamente";

impl Vlan {
    /// VLAN generated by a bulk range, named `{domain}-VLAN{number}`
    pub fn for_range(domain: &L2Domain, number: VlanNumber) -> Self {
        Self {
            id: Uuid::nil(),
            name: Some(format!("{}-VLAN{}", domain.name, number)),
            alias: None,
            number,
            description: Some(RANGE_DESCRIPTION.to_string()),
            l2domain: Some(domain.id),
            unique: false,
        }
    }
}

impl Document for Vlan {
    const COLLECTION: Collection = Collection::Vlans;

    fn id(&self) -> Uuid {
        self.id
    }
}
