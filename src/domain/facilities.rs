// Copyright (c) 2025 - Cowboy AI, Inc.
//! Locations and vendors

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{Collection, Document};

/// Contact block for site access
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationAccess {
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub intranet: Option<String>,
    pub description: Option<String>,
}

fn default_country() -> Option<String> {
    Some("Brasil".to_string())
}

/// Physical site hosting devices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Location {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Free-form grouping used by the location-by-group lookup
    pub group: Option<String>,
    pub postal_code: Option<String>,
    pub street: Option<String>,
    pub number: Option<i64>,
    pub complement: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    #[serde(default = "default_country")]
    pub country: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    #[serde(default)]
    pub access: LocationAccess,
}

impl Location {
    /// Location with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            description: None,
            group: None,
            postal_code: None,
            street: None,
            number: None,
            complement: None,
            state: None,
            city: None,
            country: default_country(),
            lat: None,
            lng: None,
            access: LocationAccess::default(),
        }
    }
}

impl Document for Location {
    const COLLECTION: Collection = Collection::Locations;

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Equipment manufacturer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vendor {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl Vendor {
    /// Vendor with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            description: None,
        }
    }
}

impl Document for Vendor {
    const COLLECTION: Collection = Collection::Vendors;

    fn id(&self) -> Uuid {
        self.id
    }
}
