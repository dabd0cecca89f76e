// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Value Objects with Validation Invariants

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;

/// Network validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("Invalid prefix length: {0} (must be 0-32 for IPv4, 0-128 for IPv6)")]
    InvalidPrefixLength(u8),

    #[error("Invalid VLAN number: {0} (must be 1-4095)")]
    InvalidVlanNumber(i64),

    #[error("Invalid VLAN range {start}-{end}: start must be lower than end")]
    InvertedVlanRange { start: i64, end: i64 },

    #[error("VLAN range {start}-{end} is outside the permitted 2-4094")]
    VlanRangeOutOfBounds { start: i64, end: i64 },

    #[error("Invalid MTU: {0} (must be 68-9216)")]
    InvalidMtu(u32),
}

/// IP Address with CIDR notation value object
///
/// Represents an IPv4 or IPv6 address with optional prefix length.
/// Serialized as its CIDR string (`"10.0.0.1/24"`).
///
/// # Examples
///
/// ```rust
/// use mpls_inventory::domain::IpAddressWithCidr;
///
/// let ip = IpAddressWithCidr::new("192.168.1.10/24").unwrap();
/// assert_eq!(ip.address().to_string(), "192.168.1.10");
/// assert_eq!(ip.prefix_length(), Some(24));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IpAddressWithCidr {
    address: IpAddr,
    prefix_length: Option<u8>,
}

impl IpAddressWithCidr {
    /// Create a new IP address with optional CIDR notation
    ///
    /// # Invariants
    /// - Valid IP address format
    /// - Prefix length 0-32 for IPv4, 0-128 for IPv6
    pub fn new(cidr: impl AsRef<str>) -> Result<Self, NetworkError> {
        let cidr = cidr.as_ref().trim();

        if let Some((addr_str, prefix_str)) = cidr.split_once('/') {
            let address = IpAddr::from_str(addr_str)
                .map_err(|_| NetworkError::InvalidIpAddress(addr_str.to_string()))?;

            let prefix_length = prefix_str
                .parse::<u8>()
                .map_err(|_| NetworkError::InvalidCidr(cidr.to_string()))?;

            Self::from_parts(address, Some(prefix_length))
        } else {
            let address = IpAddr::from_str(cidr)
                .map_err(|_| NetworkError::InvalidIpAddress(cidr.to_string()))?;

            Ok(Self {
                address,
                prefix_length: None,
            })
        }
    }

    /// Create from separate address and prefix
    pub fn from_parts(address: IpAddr, prefix_length: Option<u8>) -> Result<Self, NetworkError> {
        if let Some(prefix) = prefix_length {
            let max_prefix = match address {
                IpAddr::V4(_) => 32,
                IpAddr::V6(_) => 128,
            };

            if prefix > max_prefix {
                return Err(NetworkError::InvalidPrefixLength(prefix));
            }
        }

        Ok(Self {
            address,
            prefix_length,
        })
    }

    /// Get the IP address (host portion, prefix stripped)
    pub fn address(&self) -> IpAddr {
        self.address
    }

    /// Get the prefix length
    pub fn prefix_length(&self) -> Option<u8> {
        self.prefix_length
    }

    /// True when both values name the same host, whatever their prefix lengths
    pub fn same_host(&self, other: &IpAddressWithCidr) -> bool {
        self.address == other.address
    }

    /// Get as CIDR notation string
    pub fn as_cidr(&self) -> String {
        if let Some(prefix) = self.prefix_length {
            format!("{}/{}", self.address, prefix)
        } else {
            self.address.to_string()
        }
    }
}

impl fmt::Display for IpAddressWithCidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_cidr())
    }
}

impl FromStr for IpAddressWithCidr {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for IpAddressWithCidr {
    type Error = NetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IpAddressWithCidr> for String {
    fn from(value: IpAddressWithCidr) -> Self {
        value.as_cidr()
    }
}

/// VLAN number as stored on a VLAN document
///
/// Accepts 1-4095 inclusive. Bulk range operations use the narrower
/// window of [`VlanRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u16")]
pub struct VlanNumber(u16);

impl VlanNumber {
    /// Minimum accepted VLAN number
    pub const MIN: u16 = 1;

    /// Maximum accepted VLAN number
    pub const MAX: u16 = 4095;

    /// Create a new VLAN number with validation
    pub fn new(number: i64) -> Result<Self, NetworkError> {
        if number < i64::from(Self::MIN) || number > i64::from(Self::MAX) {
            return Err(NetworkError::InvalidVlanNumber(number));
        }
        Ok(Self(number as u16))
    }

    /// Get the VLAN number value
    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for VlanNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for VlanNumber {
    type Error = NetworkError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VlanNumber> for u16 {
    fn from(value: VlanNumber) -> Self {
        value.0
    }
}

/// Half-open VLAN range `[start, end)` used by bulk create and delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VlanRange {
    start: u16,
    end: u16,
}

impl VlanRange {
    /// Lowest start accepted for bulk creation
    pub const MIN_START: i64 = 2;

    /// Highest end accepted for bulk creation
    pub const MAX_END: i64 = 4094;

    /// Validate a range for bulk creation
    ///
    /// # Invariants
    /// - `start < end`
    /// - `2 <= start` and `end <= 4094`
    pub fn for_creation(start: i64, end: i64) -> Result<Self, NetworkError> {
        if start >= end {
            return Err(NetworkError::InvertedVlanRange { start, end });
        }
        if start < Self::MIN_START || end > Self::MAX_END {
            return Err(NetworkError::VlanRangeOutOfBounds { start, end });
        }
        Ok(Self {
            start: start as u16,
            end: end as u16,
        })
    }

    /// Validate a range for bulk deletion (only ordering is checked)
    pub fn for_deletion(start: i64, end: i64) -> Result<Self, NetworkError> {
        if start >= end {
            return Err(NetworkError::InvertedVlanRange { start, end });
        }
        let clamp = |n: i64| n.clamp(0, i64::from(u16::MAX)) as u16;
        Ok(Self {
            start: clamp(start),
            end: clamp(end),
        })
    }

    /// First number in the range
    pub fn start(&self) -> u16 {
        self.start
    }

    /// First number past the range
    pub fn end(&self) -> u16 {
        self.end
    }

    /// Whether `number` falls inside `[start, end)`
    pub fn contains(&self, number: u16) -> bool {
        number >= self.start && number < self.end
    }

    /// Number of VLANs in the range
    pub fn len(&self) -> usize {
        usize::from(self.end - self.start)
    }

    /// Always false for a validated range
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Iterate the numbers of the range
    pub fn numbers(&self) -> impl Iterator<Item = u16> {
        self.start..self.end
    }
}

impl fmt::Display for VlanRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// MTU (Maximum Transmission Unit) value object
///
/// Invariants:
/// - 68 = minimum IPv4 MTU
/// - 9216 = largest jumbo frame carried by the routers in the mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Mtu(u32);

impl Mtu {
    /// Minimum MTU (IPv4 minimum)
    pub const MIN: u32 = 68;

    /// Maximum MTU
    pub const MAX: u32 = 9216;

    /// Standard Ethernet MTU
    pub const STANDARD_ETHERNET: u32 = 1500;

    /// Create a new MTU with validation
    pub fn new(size: u32) -> Result<Self, NetworkError> {
        if !(Self::MIN..=Self::MAX).contains(&size) {
            return Err(NetworkError::InvalidMtu(size));
        }

        Ok(Self(size))
    }

    /// Get the MTU value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for Mtu {
    fn default() -> Self {
        Self(Self::STANDARD_ETHERNET)
    }
}

impl fmt::Display for Mtu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Mtu {
    type Error = NetworkError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Mtu> for u32 {
    fn from(value: Mtu) -> Self {
        value.0
    }
}
