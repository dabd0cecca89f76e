// Copyright (c) 2025 - Cowboy AI, Inc.
//! `/location` and `/vendor`

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use tracing::Instrument;
use uuid::Uuid;

use super::{created, deleted, found, found_many, updated};
use crate::api::envelope::ApiResult;
use crate::api::extract::{Params, Payload, ViewQuery};
use crate::api::AppState;
use crate::domain::{Location, Vendor};
use crate::store::{Collection, Patch};
use crate::telemetry::RequestContext;

const LOCATION: &str = Collection::Locations.entity();
const VENDOR: &str = Collection::Vendors.entity();

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/location", get(list_locations).post(create_location))
        .route(
            "/location/:key",
            get(get_location).put(update_location).delete(delete_location),
        )
        .route("/vendor", get(list_vendors).post(create_vendor))
        .route(
            "/vendor/:id",
            get(get_vendor).put(update_vendor).delete(delete_vendor),
        )
}

async fn create_location(
    State(state): State<AppState>,
    ctx: RequestContext,
    Payload(location): Payload<Location>,
) -> ApiResult {
    let location = state
        .inventory
        .facilities
        .create_location(location)
        .instrument(ctx.span())
        .await?;
    created(LOCATION, &location.name, &location)
}

async fn list_locations(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: ViewQuery,
) -> ApiResult {
    let locations = state
        .inventory
        .facilities
        .list_locations(query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(LOCATION, locations)
}

/// A UUID segment names one location; anything else is a group name
async fn get_location(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(key): Params<String>,
    query: ViewQuery,
) -> ApiResult {
    let facilities = &state.inventory.facilities;
    match Uuid::parse_str(&key) {
        Ok(id) => {
            let location = facilities
                .get_location(id, query.depth())
                .instrument(ctx.span())
                .await?;
            found(LOCATION, location)
        }
        Err(_) => {
            let locations = facilities
                .locations_by_group(&key, query.depth())
                .instrument(ctx.span())
                .await?;
            found_many(LOCATION, locations)
        }
    }
}

async fn update_location(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    Payload(patch): Payload<Patch>,
) -> ApiResult {
    let outcome = state
        .inventory
        .facilities
        .update_location(id, &patch)
        .instrument(ctx.span())
        .await?;
    updated(LOCATION, id, &outcome)
}

async fn delete_location(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
) -> ApiResult {
    state
        .inventory
        .facilities
        .delete_location(id)
        .instrument(ctx.span())
        .await?;
    deleted(LOCATION, id)
}

async fn create_vendor(
    State(state): State<AppState>,
    ctx: RequestContext,
    Payload(vendor): Payload<Vendor>,
) -> ApiResult {
    let vendor = state
        .inventory
        .facilities
        .create_vendor(vendor)
        .instrument(ctx.span())
        .await?;
    created(VENDOR, &vendor.name, &vendor)
}

async fn list_vendors(
    State(state): State<AppState>,
    ctx: RequestContext,
    query: ViewQuery,
) -> ApiResult {
    let vendors = state
        .inventory
        .facilities
        .list_vendors(query.depth())
        .instrument(ctx.span())
        .await?;
    found_many(VENDOR, vendors)
}

async fn get_vendor(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    query: ViewQuery,
) -> ApiResult {
    let vendor = state
        .inventory
        .facilities
        .get_vendor(id, query.depth())
        .instrument(ctx.span())
        .await?;
    found(VENDOR, vendor)
}

async fn update_vendor(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
    Payload(patch): Payload<Patch>,
) -> ApiResult {
    let outcome = state
        .inventory
        .facilities
        .update_vendor(id, &patch)
        .instrument(ctx.span())
        .await?;
    updated(VENDOR, id, &outcome)
}

async fn delete_vendor(
    State(state): State<AppState>,
    ctx: RequestContext,
    Params(id): Params<Uuid>,
) -> ApiResult {
    state
        .inventory
        .facilities
        .delete_vendor(id)
        .instrument(ctx.span())
        .await?;
    deleted(VENDOR, id)
}
