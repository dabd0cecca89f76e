// Copyright (c) 2025 - Cowboy AI, Inc.
//! `/interface_single` and `/interface_lag`
//!
//! `POST /interface_single/{id}` creates an interface on device `id`;
//! the other verbs on that path address the interface itself.

use axum::extract::State;
use axum::routing::{get, post, put};
use axum::Router;
use tracing::Instrument;
use uuid::Uuid;

use super::{created, deleted, found, found_many, updated};
use crate::api::envelope::{ApiResponse, ApiResult};
use crate::api::extract::{Params, Payload, ViewQuery};
use crate::api::AppState;
use crate::domain::{InterfaceLag, InterfaceSingle};
use crate::store::{Collection, Patch};
use crate::telemetry::RequestContext;

const INTERFACE: &str = Collection::Interfaces.entity();
const LAG: &str = Collection::Lags.entity();

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/interface_single", get(list_interfaces).post(create_interface))
        .route(
            "/interface_single/:id",
            get(get_interface)
                .post(create_interface_on_device)
                .put(update_interface)
                .delete(delete_interface),
        )
        .route("/interface_single/device/:device_id", get(interfaces_by_device))
        .route("/interface_lag", get(list_lags).post(create_lag))
        .route(
            "/interface_lag/:id",
            get(get_lag).put(update_lag).delete(delete_lag),
        )
        .route(
            "/interface_lag/interface_single/:interface_id",
            post(create_lag_from_interface),
        )
        .route("/interface_lag/attach/:interface_id/:lag_id", put(attach))
        .route("/interface_lag/detach/:interface_id", put(detach))
        .route("/interface_lag/device/:device_id", get(lags_by_device))
}

async fn create_interface(
    State(state): State<AppState>,
    ctx: RequestContext,
    Payload(interface): Payload<InterfaceSingle>,
) -> ApiResult {
    let interface = state
        .inventory
        .interfaces
        .create_interface(interface)
        .instrument(ctx.span())
        .await?;
    created(INTERFACE, &interface.name, &interface)
}

async fn create_interface_on_device(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(device_id): Params<Uuid>,
    Payload(interface): Payload<InterfaceSingle>,
) -> ApiResult {
    let interface = state
        .inventory
        .interfaces
        .create_interface_on_device(device_id, interface)
        .instrument(ctx.span())
        .await?;
    created(INTERFACE, &interface.name, &interface)
}

async fn list_interfaces(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: ViewQuery,
) -> ApiResult {
    let interfaces = state
        .inventory
        .interfaces
        .list_interfaces(query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(INTERFACE, interfaces)
}

async fn interfaces_by_device(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(device_id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let interfaces = state
        .inventory
        .interfaces
        .interfaces_by_device(device_id, query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(INTERFACE, interfaces)
}

async fn get_interface(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let interface = state
        .inventory
        .interfaces
        .get_interface(id, query.depth())
        .instrument(ctx.span())
        .await?;
    found(INTERFACE, interface)
}

async fn update_interface(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    Payload(patch): Payload<Patch>,
) -> ApiResult {
    let outcome = state
        .inventory
        .interfaces
        .update_interface(id, &patch)
        .instrument(ctx.span())
        .await?;
    updated(INTERFACE, id, &outcome)
}

async fn delete_interface(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
) -> ApiResult {
    state
        .inventory
        .interfaces
        .delete_interface(id)
        .instrument(ctx.span())
        .await?;
    deleted(INTERFACE, id)
}

async fn attach(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params((interface_id, lag_id)): Params<(Uuid, Uuid)>,
) -> ApiResult {
    let interface = state
        .inventory
        .interfaces
        .attach(interface_id, lag_id)
        .instrument(ctx.span())
        .await?;
    Ok(ApiResponse::ok(
        format!("{INTERFACE} {interface_id} attached to {LAG} {lag_id}"),
        serde_json::to_value(&interface)?,
    ))
}

async fn detach(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(interface_id): Params<Uuid>,
) -> ApiResult {
    let interface = state
        .inventory
        .interfaces
        .detach(interface_id)
        .instrument(ctx.span())
        .await?;
    Ok(ApiResponse::ok(
        format!("{INTERFACE} {interface_id} detached"),
        serde_json::to_value(&interface)?,
    ))
}

async fn create_lag(
    State(state): State<AppState>,
    ctx: RequestContext,
    Payload(lag): Payload<InterfaceLag>,
) -> ApiResult {
    let lag = state
        .inventory
        .interfaces
        .create_lag(lag)
        .instrument(ctx.span())
        .await?;
    created(LAG, &lag.name, &lag)
}

async fn create_lag_from_interface(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(interface_id): Params<Uuid>,
    Payload(lag): Payload<InterfaceLag>,
) -> ApiResult {
    let lag = state
        .inventory
        .interfaces
        .create_lag_from_interface(interface_id, lag)
        .instrument(ctx.span())
        .await?;
    created(LAG, &lag.name, &lag)
}

async fn list_lags(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: ViewQuery,
) -> ApiResult {
    let lags = state
        .inventory
        .interfaces
        .list_lags(query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(LAG, lags)
}

async fn lags_by_device(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(device_id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let lags = state
        .inventory
        .interfaces
        .lags_by_device(device_id, query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(LAG, lags)
}

async fn get_lag(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let lag = state
        .inventory
        .interfaces
        .get_lag(id, query.depth())
        .instrument(ctx.span())
        .await?;
    found(LAG, lag)
}

async fn update_lag(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    Payload(patch): Payload<Patch>,
) -> ApiResult {
    let outcome = state
        .inventory
        .interfaces
        .update_lag(id, &patch)
        .instrument(ctx.span())
        .await?;
    updated(LAG, id, &outcome)
}

async fn delete_lag(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
) -> ApiResult {
    state
        .inventory
        .interfaces
        .delete_lag(id)
        .instrument(ctx.span())
        .await?;
    deleted(LAG, id)
}
