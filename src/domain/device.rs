// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Device Record
//!
//! A device is a router or switch of the mesh. It owns its physical
//! interfaces (back-link `physical_interface`) and appears as a hop of
//! paths (back-link `path`). Its management address must be unique among
//! all devices, comparing host portions only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::attributes::{AccessType, DeviceGroup, DeviceStatus, MonitoringType, OsType, SnmpVersion};
use super::network::IpAddressWithCidr;
use crate::store::{Collection, Document};

/// Operating system block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OsConfig {
    #[serde(rename = "type", default)]
    pub kind: OsType,
    pub version: Option<String>,
    #[serde(default)]
    pub options: Map<String, Value>,
}

/// Management access block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    #[serde(default)]
    pub status: bool,
    #[serde(rename = "type", default)]
    pub kind: AccessType,
    #[serde(default)]
    pub options: Map<String, Value>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub port: Option<u16>,
    pub ssh_key: Option<String>,
}

fn default_community() -> Option<String> {
    Some("public".to_string())
}

fn default_snmp_port() -> Option<u16> {
    Some(161)
}

/// Monitoring block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitoringConfig {
    #[serde(default)]
    pub status: bool,
    #[serde(rename = "type", default)]
    pub kind: MonitoringType,
    #[serde(default = "default_community")]
    pub snmp_community: Option<String>,
    #[serde(default)]
    pub snmp_version: SnmpVersion,
    #[serde(default = "default_snmp_port")]
    pub snmp_port: Option<u16>,
    #[serde(default)]
    pub options: Map<String, Value>,
    pub group_id: Option<String>,
    pub template_id: Option<String>,
    pub zabbix_id: Option<i64>,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            status: false,
            kind: MonitoringType::default(),
            snmp_community: default_community(),
            snmp_version: SnmpVersion::default(),
            snmp_port: default_snmp_port(),
            options: Map::new(),
            group_id: None,
            template_id: None,
            zabbix_id: None,
        }
    }
}

/// Router or switch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Device {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    pub ipaddr: Option<IpAddressWithCidr>,
    pub description: Option<String>,
    #[serde(default)]
    pub group: DeviceGroup,
    pub model: Option<String>,
    #[serde(default)]
    pub status: DeviceStatus,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub os: OsConfig,
    pub location: Option<Uuid>,
    pub vendor: Option<Uuid>,
    #[serde(default)]
    pub info: Map<String, Value>,
    #[serde(default)]
    pub alarm: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Device {
    /// Device with a name and management address, everything else default
    pub fn new(name: impl Into<String>, ipaddr: Option<IpAddressWithCidr>) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            ipaddr,
            description: None,
            group: DeviceGroup::default(),
            model: None,
            status: DeviceStatus::default(),
            monitoring: MonitoringConfig::default(),
            access: AccessConfig::default(),
            os: OsConfig::default(),
            location: None,
            vendor: None,
            info: Map::new(),
            alarm: false,
            created_at: None,
        }
    }
}

impl Document for Device {
    const COLLECTION: Collection = Collection::Devices;

    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_device_defaults() {
        let device: Device =
            serde_json::from_value(json!({"name": "R1", "ipaddr": "10.0.0.1/24"})).unwrap();
        assert_eq!(device.group, DeviceGroup::Mpls);
        assert_eq!(device.status, DeviceStatus::Disable);
        assert_eq!(device.os.kind, OsType::Other);
        assert_eq!(device.access.kind, AccessType::Ssh);
        assert_eq!(device.monitoring, MonitoringConfig::default());
        assert_eq!(device.monitoring.snmp_port, Some(161));
    }

    #[test]
    fn test_invalid_enum_literal_is_rejected() {
        let result = serde_json::from_value::<Device>(json!({"name": "R1", "group": "wan"}));
        assert!(result.is_err());

        let result = serde_json::from_value::<Device>(json!({"name": "R1", "ipaddr": "10.0.0.300"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_nested_blocks_use_type_key() {
        let device: Device = serde_json::from_value(json!({
            "name": "R1",
            "os": {"type": "nokia", "version": "23.10"},
            "monitoring": {"type": "snmp", "snmp_version": "v3"},
        }))
        .unwrap();
        assert_eq!(device.os.kind, OsType::Nokia);
        assert_eq!(device.monitoring.kind, MonitoringType::Snmp);
        assert_eq!(device.monitoring.snmp_version, SnmpVersion::V3);

        let value = serde_json::to_value(&device).unwrap();
        assert_eq!(value["os"]["type"], "nokia");
    }
}
