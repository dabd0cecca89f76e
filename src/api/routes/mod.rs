// Copyright (c) 2025 - Cowboy AI, Inc.
//! Route groups, one module per facade

pub mod addressing;
pub mod devices;
pub mod facilities;
pub mod interfaces;
pub mod topology;

use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;

use super::envelope::{messages, ApiResponse, ApiResult};
use crate::store::UpdateOutcome;

pub(crate) fn created<T: Serialize>(entity: &str, key: impl Display, record: &T) -> ApiResult {
    Ok(ApiResponse::created(
        messages::created(entity, key),
        serde_json::to_value(record)?,
    ))
}

pub(crate) fn found(entity: &str, view: Value) -> ApiResult {
    Ok(ApiResponse::ok(messages::found(entity), view))
}

pub(crate) fn found_many(entity: &str, views: Vec<Value>) -> ApiResult {
    found(entity, Value::Array(views))
}

pub(crate) fn updated<T: Serialize>(
    entity: &str,
    key: impl Display,
    outcome: &UpdateOutcome<T>,
) -> ApiResult {
    Ok(ApiResponse::ok(
        messages::updated(entity, key),
        serde_json::to_value(&outcome.record)?,
    ))
}

pub(crate) fn deleted(entity: &str, key: impl Display) -> ApiResult {
    Ok(ApiResponse::ok(messages::deleted(entity, key), Value::Null))
}
