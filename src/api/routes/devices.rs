// Copyright (c) 2025 - Cowboy AI, Inc.
//! `/device`

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use tracing::Instrument;
use uuid::Uuid;

use super::{created, deleted, found, found_many, updated};
use crate::api::envelope::ApiResult;
use crate::api::extract::{Params, Payload, ViewQuery};
use crate::api::AppState;
use crate::domain::Device;
use crate::store::{Collection, Patch};
use crate::telemetry::RequestContext;

const DEVICE: &str = Collection::Devices.entity();

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/device", get(list_devices).post(create_device))
        .route(
            "/device/:id",
            get(get_device).put(update_device).delete(delete_device),
        )
}

async fn create_device(
    State(state): State<AppState>,
    ctx: RequestContext,
    Payload(device): Payload<Device>,
) -> ApiResult {
    let device = state
        .inventory
        .devices
        .create_device(device)
        .instrument(ctx.span())
        .await?;
    created(DEVICE, &device.name, &device)
}

async fn list_devices(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: ViewQuery,
) -> ApiResult {
    let devices = state
        .inventory
        .devices
        .list_devices(query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(DEVICE, devices)
}

async fn get_device(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let device = state
        .inventory
        .devices
        .get_device(id, query.depth())
        .instrument(ctx.span())
        .await?;
    found(DEVICE, device)
}

async fn update_device(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    Payload(patch): Payload<Patch>,
) -> ApiResult {
    let outcome = state
        .inventory
        .devices
        .update_device(id, &patch)
        .instrument(ctx.span())
        .await?;
    updated(DEVICE, id, &outcome)
}

async fn delete_device(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
) -> ApiResult {
    state
        .inventory
        .devices
        .delete_device(id)
        .instrument(ctx.span())
        .await?;
    deleted(DEVICE, id)
}
