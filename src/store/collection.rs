// Copyright (c) 2025 - Cowboy AI, Inc.
//! Collection Catalogue
//!
//! Static description of every document collection: its unique indexes,
//! outbound links, back-links and timestamp policy. Backends and the link
//! resolver read the catalogue; nothing about a collection is configured
//! at runtime.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use uuid::Uuid;

/// One document collection per entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Locations,
    Vendors,
    Devices,
    Interfaces,
    Lags,
    Vrfs,
    L2Domains,
    Vlans,
    Circuits,
    Paths,
    Tunnels,
    TrafficPolicies,
}

/// Outbound reference stored on a document as an id (or list of ids)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub field: &'static str,
    pub target: Collection,
    pub many: bool,
}

/// Inbound reference, resolved by querying `source` for documents whose
/// `via` fields point at this document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackLink {
    pub field: &'static str,
    pub source: Collection,
    pub via: &'static [&'static str],
}

const fn one(field: &'static str, target: Collection) -> Link {
    Link {
        field,
        target,
        many: false,
    }
}

const fn many(field: &'static str, target: Collection) -> Link {
    Link {
        field,
        target,
        many: true,
    }
}

/// Path hop fields, in order
pub const PATH_STEPS: [&str; 20] = [
    "step_1", "step_2", "step_3", "step_4", "step_5", "step_6", "step_7", "step_8", "step_9",
    "step_10", "step_11", "step_12", "step_13", "step_14", "step_15", "step_16", "step_17",
    "step_18", "step_19", "step_20",
];

/// Tunnel traffic policy step fields, in order
pub const POLICY_STEPS: [&str; 5] = ["step_1", "step_2", "step_3", "step_4", "step_5"];

/// Tunnel path fields
pub const TUNNEL_PATHS: [&str; 4] = [
    "path_primary_src",
    "path_secondary_src",
    "path_primary_dst",
    "path_secondary_dst",
];

const PATH_LINKS: [Link; 20] = {
    let mut links = [one("step_1", Collection::Devices); 20];
    let mut i = 0;
    while i < 20 {
        links[i] = one(PATH_STEPS[i], Collection::Devices);
        i += 1;
    }
    links
};

const POLICY_LINKS: [Link; 5] = [
    one("step_1", Collection::Tunnels),
    one("step_2", Collection::Tunnels),
    one("step_3", Collection::Tunnels),
    one("step_4", Collection::Tunnels),
    one("step_5", Collection::Tunnels),
];

const DEVICE_LINKS: [Link; 2] = [
    one("location", Collection::Locations),
    one("vendor", Collection::Vendors),
];

const INTERFACE_LINKS: [Link; 4] = [
    one("device", Collection::Devices),
    one("lag", Collection::Lags),
    one("vrf", Collection::Vrfs),
    many("vlan", Collection::Vlans),
];

const LAG_LINKS: [Link; 2] = [one("vrf", Collection::Vrfs), many("vlan", Collection::Vlans)];

const L2DOMAIN_LINKS: [Link; 1] = [one("location", Collection::Locations)];

const VLAN_LINKS: [Link; 1] = [one("l2domain", Collection::L2Domains)];

const CIRCUIT_LINKS: [Link; 5] = [
    one("interface_src", Collection::Interfaces),
    one("interface_dst", Collection::Interfaces),
    one("lag_src", Collection::Lags),
    one("lag_dst", Collection::Lags),
    one("bind_policy", Collection::TrafficPolicies),
];

const TUNNEL_LINKS: [Link; 4] = [
    one("path_primary_src", Collection::Paths),
    one("path_secondary_src", Collection::Paths),
    one("path_primary_dst", Collection::Paths),
    one("path_secondary_dst", Collection::Paths),
];

const DEVICE_BACK_LINKS: [BackLink; 2] = [
    BackLink {
        field: "physical_interface",
        source: Collection::Interfaces,
        via: &["device"],
    },
    BackLink {
        field: "path",
        source: Collection::Paths,
        via: &["step_1"],
    },
];

const LAG_BACK_LINKS: [BackLink; 1] = [BackLink {
    field: "interface",
    source: Collection::Interfaces,
    via: &["lag"],
}];

impl Collection {
    /// Every collection, in dependency order
    pub const ALL: [Collection; 12] = [
        Collection::Locations,
        Collection::Vendors,
        Collection::Devices,
        Collection::Interfaces,
        Collection::Lags,
        Collection::Vrfs,
        Collection::L2Domains,
        Collection::Vlans,
        Collection::Circuits,
        Collection::Paths,
        Collection::Tunnels,
        Collection::TrafficPolicies,
    ];

    /// Storage name
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Locations => "locations",
            Collection::Vendors => "vendors",
            Collection::Devices => "devices",
            Collection::Interfaces => "interfaces",
            Collection::Lags => "interface_lags",
            Collection::Vrfs => "vrfs",
            Collection::L2Domains => "l2domains",
            Collection::Vlans => "vlans",
            Collection::Circuits => "circuits",
            Collection::Paths => "paths",
            Collection::Tunnels => "tunnels",
            Collection::TrafficPolicies => "tunnel_traffic_policies",
        }
    }

    /// Human name used in response messages
    pub const fn entity(&self) -> &'static str {
        match self {
            Collection::Locations => "Location",
            Collection::Vendors => "Vendor",
            Collection::Devices => "Device",
            Collection::Interfaces => "Interface",
            Collection::Lags => "Interface Lag",
            Collection::Vrfs => "VRF",
            Collection::L2Domains => "L2Domain",
            Collection::Vlans => "Vlan",
            Collection::Circuits => "Circuit",
            Collection::Paths => "Path",
            Collection::Tunnels => "Tunnel",
            Collection::TrafficPolicies => "Tunnel Traffic Policy",
        }
    }

    /// Fields carrying a sparse unique index
    pub fn unique_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Locations
            | Collection::Vendors
            | Collection::Devices
            | Collection::Vrfs
            | Collection::L2Domains => &["name"],
            Collection::Circuits => &["name", "vc_id"],
            Collection::Tunnels => &["name", "tunnel_id"],
            Collection::Interfaces
            | Collection::Lags
            | Collection::Vlans
            | Collection::Paths
            | Collection::TrafficPolicies => &[],
        }
    }

    /// Outbound links
    pub fn links(&self) -> &'static [Link] {
        match self {
            Collection::Locations | Collection::Vendors | Collection::Vrfs => &[],
            Collection::Devices => &DEVICE_LINKS,
            Collection::Interfaces => &INTERFACE_LINKS,
            Collection::Lags => &LAG_LINKS,
            Collection::L2Domains => &L2DOMAIN_LINKS,
            Collection::Vlans => &VLAN_LINKS,
            Collection::Circuits => &CIRCUIT_LINKS,
            Collection::Paths => &PATH_LINKS,
            Collection::Tunnels => &TUNNEL_LINKS,
            Collection::TrafficPolicies => &POLICY_LINKS,
        }
    }

    /// Inbound links
    pub fn back_links(&self) -> &'static [BackLink] {
        match self {
            Collection::Devices => &DEVICE_BACK_LINKS,
            Collection::Lags => &LAG_BACK_LINKS,
            _ => &[],
        }
    }

    /// Whether documents carry `created_at`
    pub fn stamps_created(&self) -> bool {
        matches!(
            self,
            Collection::Devices
                | Collection::Circuits
                | Collection::Paths
                | Collection::Tunnels
                | Collection::TrafficPolicies
        )
    }

    /// Whether documents carry `updated_at`
    pub fn stamps_updated(&self) -> bool {
        matches!(
            self,
            Collection::Circuits
                | Collection::Paths
                | Collection::Tunnels
                | Collection::TrafficPolicies
        )
    }

    /// Look a collection up by storage name
    pub fn from_name(name: &str) -> Option<Collection> {
        Collection::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A typed record persisted in one collection
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection the record lives in
    const COLLECTION: Collection;

    /// Record id
    fn id(&self) -> Uuid;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_link_target_is_catalogued() {
        for collection in Collection::ALL {
            for link in collection.links() {
                assert!(Collection::from_name(link.target.name()).is_some());
            }
        }
    }

    #[test]
    fn test_path_links_cover_all_steps() {
        let fields: Vec<_> = Collection::Paths.links().iter().map(|l| l.field).collect();
        assert_eq!(fields, PATH_STEPS.to_vec());
        assert!(Collection::Paths
            .links()
            .iter()
            .all(|l| l.target == Collection::Devices));
    }

    #[test]
    fn test_path_names_are_not_indexed() {
        assert!(Collection::Paths.unique_fields().is_empty());
        assert_eq!(Collection::Tunnels.unique_fields(), &["name", "tunnel_id"]);
    }

    #[test]
    fn test_device_paths_follow_first_hop() {
        let back = Collection::Devices
            .back_links()
            .iter()
            .find(|b| b.field == "path")
            .unwrap();
        assert_eq!(back.source, Collection::Paths);
        assert_eq!(back.via, &["step_1"]);
    }

    #[test]
    fn test_names_round_trip() {
        for collection in Collection::ALL {
            assert_eq!(Collection::from_name(collection.name()), Some(collection));
        }
    }
}
