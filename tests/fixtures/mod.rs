// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for mpls-inventory
//!
//! Builders for a small two-router network plus helpers to drive the HTTP
//! router in-process.
//!
//! Every fixture starts from an empty in-memory store, so tests never share
//! state.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use mpls_inventory::domain::{
    Device, InterfaceSingle, IpAddressWithCidr, L2Domain, Location, Vendor,
};
use mpls_inventory::{api, Inventory};

pub const SITE: &str = "POA";
pub const R1_ADDRESS: &str = "10.0.0.1/24";
pub const R2_ADDRESS: &str = "10.0.0.2/24";

pub fn cidr(value: &str) -> IpAddressWithCidr {
    IpAddressWithCidr::new(value).expect("Invalid address in test fixture")
}

/// Two routers at one site, one port each
pub struct Network {
    pub inventory: Inventory,
    pub site: Location,
    pub vendor: Vendor,
    pub r1: Device,
    pub r2: Device,
    pub r1_port: InterfaceSingle,
    pub r2_port: InterfaceSingle,
}

impl Network {
    pub async fn build() -> Self {
        Self::build_on(Inventory::in_memory()).await
    }

    pub async fn build_on(inventory: Inventory) -> Self {
        let site = inventory
            .facilities
            .create_location(Location::named(SITE))
            .await
            .expect("Failed to create site");
        let vendor = inventory
            .facilities
            .create_vendor(Vendor::named("Juniper"))
            .await
            .expect("Failed to create vendor");

        let r1 = Self::router(&inventory, "R1", R1_ADDRESS, &site, &vendor).await;
        let r2 = Self::router(&inventory, "R2", R2_ADDRESS, &site, &vendor).await;

        let r1_port = inventory
            .interfaces
            .create_interface_on_device(r1.id, InterfaceSingle::named("xe-0/0/0"))
            .await
            .expect("Failed to create R1 port");
        let r2_port = inventory
            .interfaces
            .create_interface_on_device(r2.id, InterfaceSingle::named("xe-0/0/0"))
            .await
            .expect("Failed to create R2 port");

        Self {
            inventory,
            site,
            vendor,
            r1,
            r2,
            r1_port,
            r2_port,
        }
    }

    async fn router(
        inventory: &Inventory,
        name: &str,
        address: &str,
        site: &Location,
        vendor: &Vendor,
    ) -> Device {
        let mut device = Device::new(name, Some(cidr(address)));
        device.location = Some(site.id);
        device.vendor = Some(vendor.id);
        inventory
            .devices
            .create_device(device)
            .await
            .expect("Failed to create router")
    }

    /// L2 domain at the network's site
    pub async fn l2domain(&self, name: &str) -> L2Domain {
        let mut domain = L2Domain::named(name);
        domain.location = Some(self.site.id);
        self.inventory
            .addressing
            .create_l2domain(domain)
            .await
            .expect("Failed to create l2domain")
    }
}

// HTTP

/// Router over a fresh in-memory inventory
pub fn app() -> Router {
    app_on(Inventory::in_memory())
}

pub fn app_on(inventory: Inventory) -> Router {
    api::router(inventory, &["http://localhost:8000".to_string()])
}

/// Send one request and decode the envelope
pub async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Invalid test request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let envelope = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, envelope)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    call(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    call(app, Method::DELETE, uri, None).await
}

/// Id of the record in a success envelope
pub fn data_id(envelope: &Value) -> Uuid {
    envelope["data"]["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("Envelope carries no record id")
}
