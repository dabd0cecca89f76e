// Copyright (c) 2025 - Cowboy AI, Inc.
//! `/circuits`, `/path`, `/tunnel` and `/tunnel_traffic_policies`

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use tracing::Instrument;
use uuid::Uuid;

use super::{created, deleted, found, found_many, updated};
use crate::api::envelope::ApiResult;
use crate::api::extract::{Params, Payload, ViewQuery};
use crate::api::AppState;
use crate::domain::{Circuit, Path as NetworkPath, Tunnel, TunnelTrafficPolicy};
use crate::store::{Collection, Patch};
use crate::telemetry::RequestContext;

const CIRCUIT: &str = Collection::Circuits.entity();
const PATH: &str = Collection::Paths.entity();
const TUNNEL: &str = Collection::Tunnels.entity();
const POLICY: &str = Collection::TrafficPolicies.entity();

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/circuits", get(list_circuits).post(create_circuit))
        .route(
            "/circuits/:id",
            get(get_circuit).put(update_circuit).delete(delete_circuit),
        )
        .route("/path", get(list_paths).post(create_path))
        .route("/path/:id", get(get_path).put(update_path).delete(delete_path))
        .route("/path/device/:device_id", get(paths_by_device))
        .route("/tunnel", get(list_tunnels).post(create_tunnel))
        .route(
            "/tunnel/:id",
            get(get_tunnel).put(update_tunnel).delete(delete_tunnel),
        )
        .route(
            "/tunnel_traffic_policies",
            get(list_policies).post(create_policy),
        )
        .route(
            "/tunnel_traffic_policies/:id",
            get(get_policy).put(update_policy).delete(delete_policy),
        )
}

async fn create_circuit(
    State(state): State<AppState>,
    ctx: RequestContext,
    Payload(circuit): Payload<Circuit>,
) -> ApiResult {
    let circuit = state
        .inventory
        .topology
        .create_circuit(circuit)
        .instrument(ctx.span())
        .await?;
    created(CIRCUIT, &circuit.name, &circuit)
}

async fn list_circuits(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: ViewQuery,
) -> ApiResult {
    let circuits = state
        .inventory
        .topology
        .list_circuits(query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(CIRCUIT, circuits)
}

async fn get_circuit(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let circuit = state
        .inventory
        .topology
        .get_circuit(id, query.depth())
        .instrument(ctx.span())
        .await?;
    found(CIRCUIT, circuit)
}

async fn update_circuit(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    Payload(patch): Payload<Patch>,
) -> ApiResult {
    let outcome = state
        .inventory
        .topology
        .update_circuit(id, &patch)
        .instrument(ctx.span())
        .await?;
    updated(CIRCUIT, id, &outcome)
}

async fn delete_circuit(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
) -> ApiResult {
    state
        .inventory
        .topology
        .delete_circuit(id)
        .instrument(ctx.span())
        .await?;
    deleted(CIRCUIT, id)
}

async fn create_path(
    State(state): State<AppState>,
    ctx: RequestContext,
    Payload(path): Payload<NetworkPath>,
) -> ApiResult {
    let path = state
        .inventory
        .topology
        .create_path(path)
        .instrument(ctx.span())
        .await?;
    created(PATH, &path.name, &path)
}

async fn list_paths(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: ViewQuery,
) -> ApiResult {
    let paths = state
        .inventory
        .topology
        .list_paths(query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(PATH, paths)
}

async fn paths_by_device(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(device_id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let paths = state
        .inventory
        .topology
        .paths_by_device(device_id, query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(PATH, paths)
}

async fn get_path(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let path = state
        .inventory
        .topology
        .get_path(id, query.depth())
        .instrument(ctx.span())
        .await?;
    found(PATH, path)
}

async fn update_path(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    Payload(patch): Payload<Patch>,
) -> ApiResult {
    let outcome = state
        .inventory
        .topology
        .update_path(id, &patch)
        .instrument(ctx.span())
        .await?;
    updated(PATH, id, &outcome)
}

async fn delete_path(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
) -> ApiResult {
    state
        .inventory
        .topology
        .delete_path(id)
        .instrument(ctx.span())
        .await?;
    deleted(PATH, id)
}

async fn create_tunnel(
    State(state): State<AppState>,
    ctx: RequestContext,
    Payload(tunnel): Payload<Tunnel>,
) -> ApiResult {
    let tunnel = state
        .inventory
        .topology
        .create_tunnel(tunnel)
        .instrument(ctx.span())
        .await?;
    created(TUNNEL, &tunnel.name, &tunnel)
}

async fn list_tunnels(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: ViewQuery,
) -> ApiResult {
    let tunnels = state
        .inventory
        .topology
        .list_tunnels(query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(TUNNEL, tunnels)
}

async fn get_tunnel(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let tunnel = state
        .inventory
        .topology
        .get_tunnel(id, query.depth())
        .instrument(ctx.span())
        .await?;
    found(TUNNEL, tunnel)
}

async fn update_tunnel(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    Payload(patch): Payload<Patch>,
) -> ApiResult {
    let outcome = state
        .inventory
        .topology
        .update_tunnel(id, &patch)
        .instrument(ctx.span())
        .await?;
    updated(TUNNEL, id, &outcome)
}

async fn delete_tunnel(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
) -> ApiResult {
    state
        .inventory
        .topology
        .delete_tunnel(id)
        .instrument(ctx.span())
        .await?;
    deleted(TUNNEL, id)
}

async fn create_policy(
    State(state): State<AppState>,
    ctx: RequestContext,
    Payload(policy): Payload<TunnelTrafficPolicy>,
) -> ApiResult {
    let policy = state
        .inventory
        .topology
        .create_policy(policy)
        .instrument(ctx.span())
        .await?;
    created(POLICY, &policy.name, &policy)
}

async fn list_policies(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: ViewQuery,
) -> ApiResult {
    let policies = state
        .inventory
        .topology
        .list_policies(query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(POLICY, policies)
}

async fn get_policy(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let policy = state
        .inventory
        .topology
        .get_policy(id, query.depth())
        .instrument(ctx.span())
        .await?;
    found(POLICY, policy)
}

async fn update_policy(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    Payload(patch): Payload<Patch>,
) -> ApiResult {
    let outcome = state
        .inventory
        .topology
        .update_policy(id, &patch)
        .instrument(ctx.span())
        .await?;
    updated(POLICY, id, &outcome)
}

async fn delete_policy(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
) -> ApiResult {
    state
        .inventory
        .topology
        .delete_policy(id)
        .instrument(ctx.span())
        .await?;
    deleted(POLICY, id)
}
