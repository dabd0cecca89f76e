// Copyright (c) 2025 - Cowboy AI, Inc.
//! `/vrf`, `/l2domain` and `/vlan`
//!
//! `GET /vlan/{id}` lists the VLANs of L2 domain `id`; a single VLAN is
//! read through `GET /vlan/id/{id}`.

use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use tracing::Instrument;
use uuid::Uuid;

use super::{created, deleted, found, found_many, updated};
use crate::api::envelope::{ApiResponse, ApiResult};
use crate::api::extract::{Params, Payload, ViewQuery};
use crate::api::AppState;
use crate::domain::{L2Domain, Vlan, Vrf};
use crate::store::{Collection, Patch};
use crate::telemetry::RequestContext;

const VRF: &str = Collection::Vrfs.entity();
const L2DOMAIN: &str = Collection::L2Domains.entity();
const VLAN: &str = Collection::Vlans.entity();

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vrf", get(list_vrfs).post(create_vrf))
        .route("/vrf/:id", get(get_vrf).put(update_vrf).delete(delete_vrf))
        .route("/l2domain", get(list_l2domains).post(create_l2domain))
        .route(
            "/l2domain/:id",
            get(get_l2domain).put(update_l2domain).delete(delete_l2domain),
        )
        .route("/l2domain/location/:location_id", get(l2domains_by_location))
        .route("/vlan", get(list_vlans).post(create_vlan))
        .route(
            "/vlan/:id",
            get(vlans_by_l2domain).put(update_vlan).delete(delete_vlan),
        )
        .route("/vlan/id/:id", get(get_vlan))
        .route(
            "/vlan/range/:l2domain_id/:start/:end",
            post(create_vlan_range).delete(delete_vlan_range),
        )
}

// VRF

async fn create_vrf(
    State(state): State<AppState>,
    ctx: RequestContext,
    Payload(vrf): Payload<Vrf>,
) -> ApiResult {
    let vrf = state
        .inventory
        .addressing
        .create_vrf(vrf)
        .instrument(ctx.span())
        .await?;
    created(VRF, &vrf.name, &vrf)
}

async fn list_vrfs(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: ViewQuery,
) -> ApiResult {
    let vrfs = state
        .inventory
        .addressing
        .list_vrfs(query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(VRF, vrfs)
}

async fn get_vrf(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let vrf = state
        .inventory
        .addressing
        .get_vrf(id, query.depth())
        .instrument(ctx.span())
        .await?;
    found(VRF, vrf)
}

async fn update_vrf(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    Payload(patch): Payload<Patch>,
) -> ApiResult {
    let outcome = state
        .inventory
        .addressing
        .update_vrf(id, &patch)
        .instrument(ctx.span())
        .await?;
    updated(VRF, id, &outcome)
}

async fn delete_vrf(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
) -> ApiResult {
    state
        .inventory
        .addressing
        .delete_vrf(id)
        .instrument(ctx.span())
        .await?;
    deleted(VRF, id)
}

// L2 domain

async fn create_l2domain(
    State(state): State<AppState>,
    ctx: RequestContext,
    Payload(domain): Payload<L2Domain>,
) -> ApiResult {
    let domain = state
        .inventory
        .addressing
        .create_l2domain(domain)
        .instrument(ctx.span())
        .await?;
    created(L2DOMAIN, &domain.name, &domain)
}

async fn list_l2domains(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: ViewQuery,
) -> ApiResult {
    let domains = state
        .inventory
        .addressing
        .list_l2domains(query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(L2DOMAIN, domains)
}

async fn l2domains_by_location(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(location_id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let domains = state
        .inventory
        .addressing
        .l2domains_by_location(location_id, query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(L2DOMAIN, domains)
}

async fn get_l2domain(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let domain = state
        .inventory
        .addressing
        .get_l2domain(id, query.depth())
        .instrument(ctx.span())
        .await?;
    found(L2DOMAIN, domain)
}

async fn update_l2domain(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    Payload(patch): Payload<Patch>,
) -> ApiResult {
    let outcome = state
        .inventory
        .addressing
        .update_l2domain(id, &patch)
        .instrument(ctx.span())
        .await?;
    updated(L2DOMAIN, id, &outcome)
}

async fn delete_l2domain(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
) -> ApiResult {
    state
        .inventory
        .addressing
        .delete_l2domain(id)
        .instrument(ctx.span())
        .await?;
    deleted(L2DOMAIN, id)
}

// VLAN

async fn create_vlan(
    State(state): State<AppState>,
    ctx: RequestContext,
    Payload(vlan): Payload<Vlan>,
) -> ApiResult {
    let vlan = state
        .inventory
        .addressing
        .create_vlan(vlan)
        .instrument(ctx.span())
        .await?;
    created(VLAN, vlan.number, &vlan)
}

async fn create_vlan_range(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params((l2domain_id, start, end)): Params<(Uuid, i64, i64)>,
) -> ApiResult {
    let vlans = state
        .inventory
        .addressing
        .create_vlan_range(l2domain_id, start, end)
        .instrument(ctx.span())
        .await?;
    created(&format!("{VLAN} range"), format!("{start}-{end}"), &vlans)
}

async fn delete_vlan_range(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params((l2domain_id, start, end)): Params<(Uuid, i64, i64)>,
) -> ApiResult {
    let removed = state
        .inventory
        .addressing
        .delete_vlan_range(l2domain_id, start, end)
        .instrument(ctx.span())
        .await?;
    Ok(ApiResponse::ok(
        format!("{VLAN} range {start}-{end} deleted successfully!"),
        serde_json::json!({ "deleted": removed }),
    ))
}

async fn list_vlans(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: ViewQuery,
) -> ApiResult {
    let vlans = state
        .inventory
        .addressing
        .list_vlans(query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(VLAN, vlans)
}

async fn vlans_by_l2domain(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(l2domain_id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let vlans = state
        .inventory
        .addressing
        .vlans_by_l2domain(l2domain_id, query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(VLAN, vlans)
}

async fn get_vlan(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let vlan = state
        .inventory
        .addressing
        .get_vlan(id, query.depth())
        .instrument(ctx.span())
        .await?;
    found(VLAN, vlan)
}

async fn update_vlan(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    Payload(patch): Payload<Patch>,
) -> ApiResult {
    let outcome = state
        .inventory
        .addressing
        .update_vlan(id, &patch)
        .instrument(ctx.span())
        .await?;
    updated(VLAN, id, &outcome)
}

async fn delete_vlan(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
) -> ApiResult {
    state
        .inventory
        .addressing
        .delete_vlan(id)
        .instrument(ctx.span())
        .await?;
    deleted(VLAN, id)
}
