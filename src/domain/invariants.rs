// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Domain Invariants
//!
//! Cross-entity rules that can be decided once the relevant documents are
//! loaded. The facades do the loading; everything here is pure.
//!
//! # Invariant Categories
//!
//! 1. **Circuit endpoints**: exactly one of interface/LAG per side, and the
//!    two sides must not share a device
//! 2. **Device addressing**: management addresses are unique per host,
//!    whatever the prefix length
//! 3. **VLAN ranges**: a bulk range must not overlap existing numbers

use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

use super::network::{IpAddressWithCidr, VlanRange};

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// End of a circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Source,
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Destination => write!(f, "destination"),
        }
    }
}

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Both an interface and a LAG were given for one side
    #[error("Circuit {side} must reference an interface or a lag, not both")]
    AmbiguousEndpoint { side: Side },

    /// Neither an interface nor a LAG was given for one side
    #[error("Circuit {side} must reference an interface or a lag")]
    MissingEndpoint { side: Side },

    /// The endpoint exists but belongs to no device
    #[error("Circuit {side} endpoint is not attached to any device")]
    UnresolvedEndpoint { side: Side },

    /// Both ends of a circuit land on the same device
    #[error("Circuit source and destination are on the same device {device}")]
    SameDevice { device: Uuid },
}

/// Resolved endpoint selection of one circuit side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Interface(Uuid),
    Lag(Uuid),
}

/// Pick the single endpoint of a circuit side
pub fn circuit_endpoint(
    side: Side,
    interface: Option<Uuid>,
    lag: Option<Uuid>,
) -> Result<Endpoint, ValidationError> {
    match (interface, lag) {
        (Some(interface), None) => Ok(Endpoint::Interface(interface)),
        (None, Some(lag)) => Ok(Endpoint::Lag(lag)),
        (Some(_), Some(_)) => Err(ValidationError::AmbiguousEndpoint { side }),
        (None, None) => Err(ValidationError::MissingEndpoint { side }),
    }
}

/// Check that the devices behind both circuit sides are known and disjoint
///
/// A LAG endpoint resolves to the set of devices of its members, so the
/// sets may hold more than one device.
pub fn validate_distinct_devices(
    source: &BTreeSet<Uuid>,
    destination: &BTreeSet<Uuid>,
) -> ValidationResult {
    if source.is_empty() {
        return Err(ValidationError::UnresolvedEndpoint { side: Side::Source });
    }
    if destination.is_empty() {
        return Err(ValidationError::UnresolvedEndpoint {
            side: Side::Destination,
        });
    }
    match source.intersection(destination).next() {
        Some(device) => Err(ValidationError::SameDevice { device: *device }),
        None => Ok(()),
    }
}

/// First existing address naming the same host as `candidate`
pub fn host_collision<'a, I>(candidate: &IpAddressWithCidr, existing: I) -> Option<&'a IpAddressWithCidr>
where
    I: IntoIterator<Item = &'a IpAddressWithCidr>,
{
    existing.into_iter().find(|ip| ip.same_host(candidate))
}

/// Numbers of `range` already taken
pub fn range_collisions(range: &VlanRange, taken: impl IntoIterator<Item = u16>) -> Vec<u16> {
    let mut hits: Vec<u16> = taken.into_iter().filter(|n| range.contains(*n)).collect();
    hits.sort_unstable();
    hits.dedup();
    hits
}
