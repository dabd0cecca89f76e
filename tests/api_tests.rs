// Copyright (c) 2025 - Cowboy AI, Inc.
//! HTTP surface tests
//!
//! Drive the axum router in-process with `tower::ServiceExt::oneshot` and
//! check status codes and envelopes.

mod fixtures;

use axum::http::StatusCode;
use fixtures::{app, app_on, data_id, delete, get, post, put, Network};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn test_location_lifecycle() {
    let app = app();

    let (status, body) = post(&app, "/ipam/location", json!({"name": "POA", "group": "south"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Location POA created successfully!");
    let id = data_id(&body);

    let (status, body) = post(&app, "/ipam/location", json!({"name": "POA"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "failure");

    let (status, body) = get(&app, "/ipam/location/south").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (status, body) = get(&app, &format!("/ipam/location/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Location found!");
    assert_eq!(body["data"]["name"], "POA");
    assert_eq!(body["data"]["country"], "Brasil");

    let (status, body) = put(
        &app,
        &format!("/ipam/location/{id}"),
        json!({"description": "Porto Alegre"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Location {id} updated successfully!"));
    assert_eq!(body["data"]["description"], "Porto Alegre");

    let (status, _) = delete(&app, &format!("/ipam/location/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = get(&app, &format!("/ipam/location/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_device_views_follow_depth() {
    let app = app();
    let (_, site) = post(&app, "/ipam/location", json!({"name": "POA"})).await;
    let site_id = data_id(&site);

    let (status, body) = post(
        &app,
        "/ipam/device",
        json!({"name": "R1", "ipaddr": "10.0.0.1/24", "location": site_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let r1 = data_id(&body);

    let (status, _) = post(
        &app,
        "/ipam/device",
        json!({"name": "R2", "ipaddr": "10.0.0.1/30"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = get(&app, &format!("/ipam/device/{r1}")).await;
    assert_eq!(body["data"]["location"]["name"], "POA");
    assert_eq!(body["data"]["physical_interface"], json!([]));

    let (_, body) = get(&app, &format!("/ipam/device/{r1}?depth=0")).await;
    assert_eq!(body["data"]["location"], json!(site_id.to_string()));
    assert!(body["data"]["physical_interface"].is_null());
}

#[tokio::test]
async fn test_malformed_payloads_are_unprocessable() {
    let app = app();

    let (status, body) = post(&app, "/ipam/vendor", json!("Juniper")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "failure");

    let (status, _) = post(&app, "/ipam/vendor", json!({"name": "Juniper", "colour": "red"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = post(&app, "/ipam/device", json!({"name": "R1", "ipaddr": "10.0.0.300"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_malformed_urls_are_enveloped() {
    let app = app();
    let (_, domain) = post(&app, "/ipam/l2domain", json!({"name": "DC1"})).await;
    let dc1 = data_id(&domain);

    for (status, body) in [
        get(&app, "/ipam/device/not-a-uuid").await,
        get(&app, "/ipam/device?depth=deep").await,
        post(&app, &format!("/ipam/vlan/range/{dc1}/abc/20"), json!({})).await,
        put(&app, "/ipam/interface_lag/detach/42", json!({})).await,
    ] {
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], "failure");
        assert!(body["message"].is_string());
        assert_eq!(body["data"], Value::Null);
    }

    // Deep views are clamped rather than rejected
    let (status, body) = get(&app, "/ipam/device?depth=999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_lag_membership_over_http() {
    let app = app();
    let (_, device) = post(&app, "/ipam/device", json!({"name": "R1"})).await;
    let device_id = data_id(&device);

    let (status, body) = post(
        &app,
        &format!("/ipam/interface_single/{device_id}"),
        json!({"name": "xe-0/0/0"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let port = data_id(&body);

    let (status, body) = post(
        &app,
        &format!("/ipam/interface_lag/interface_single/{port}"),
        json!({"name": "ae0"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let lag = data_id(&body);

    let (_, body) = get(&app, &format!("/ipam/interface_lag/{lag}")).await;
    assert_eq!(body["data"]["interface"].as_array().map(Vec::len), Some(1));

    let (status, body) = put(&app, &format!("/ipam/interface_lag/detach/{port}"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["lag"], Value::Null);

    let (status, _) = put(&app, &format!("/ipam/interface_lag/detach/{port}"), json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = put(
        &app,
        &format!("/ipam/interface_lag/attach/{port}/{lag}"),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["lag"], json!(lag.to_string()));

    let (_, body) = get(&app, &format!("/ipam/interface_lag/device/{device_id}")).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (_, body) = get(&app, &format!("/ipam/interface_single/device/{device_id}")).await;
    assert_eq!(body["data"][0]["lag"]["name"], "ae0");
}

#[tokio::test]
async fn test_vlan_ranges_over_http() {
    let app = app();
    let (_, domain) = post(&app, "/ipam/l2domain", json!({"name": "DC1"})).await;
    let dc1 = data_id(&domain);

    let (status, body) = post(&app, &format!("/ipam/vlan/range/{dc1}/10/20"), json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Vlan range 10-20 created successfully!");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(10));
    let first = body["data"][0]["id"].as_str().map(String::from).unwrap();

    let (status, _) = post(&app, &format!("/ipam/vlan/range/{dc1}/15/25"), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = post(&app, &format!("/ipam/vlan/range/{dc1}/1/10"), json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = get(&app, &format!("/ipam/vlan/{dc1}")).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(10));

    let (_, body) = get(&app, &format!("/ipam/vlan/id/{first}")).await;
    assert_eq!(body["data"]["name"], "DC1-VLAN10");
    assert_eq!(body["data"]["l2domain"]["name"], "DC1");

    let (status, body) = delete(&app, &format!("/ipam/vlan/range/{dc1}/10/15")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], 5);

    let (_, body) = get(&app, &format!("/ipam/vlan/{dc1}")).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn test_topology_over_http() {
    let net = Network::build().await;
    let app = app_on(net.inventory.clone());

    let (status, body) = post(
        &app,
        "/ipam/path",
        json!({"name": "core", "step_1": net.r1.id, "step_2": net.r2.id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "PATH-CORE");
    let path = data_id(&body);

    let (_, body) = get(&app, &format!("/ipam/path/device/{}", net.r1.id)).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (status, _) = post(
        &app,
        "/ipam/tunnel",
        json!({"name": "T1", "path_primary_src": path}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = delete(&app, &format!("/ipam/path/{path}")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = post(
        &app,
        "/ipam/circuits",
        json!({"name": "C0", "interface_src": net.r1_port.id, "interface_dst": net.r1_port.id}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = post(
        &app,
        "/ipam/circuits",
        json!({"name": "C1", "interface_src": net.r1_port.id, "interface_dst": net.r2_port.id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let circuit = data_id(&body);
    let stamped = body["data"]["updated_at"].clone();
    assert!(!stamped.is_null());

    let (status, body) = put(&app, &format!("/ipam/circuits/{circuit}"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["updated_at"], stamped);
}
