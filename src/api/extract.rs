// Copyright (c) 2025 - Cowboy AI, Inc.
//! Request extractors
//!
//! - [`RequestContext`] from the correlation and user headers
//! - [`Payload`]: JSON body whose rejections use the envelope
//! - [`Params`]: URL segments, rejected the same way
//! - [`ViewQuery`]: `?depth=N` for link resolution

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::convert::Infallible;

use super::envelope::ApiError;
use crate::errors::InventoryError;
use crate::store::MAX_DEPTH;
use crate::telemetry::{RequestContext, CORRELATION_HEADER, USER_HEADER};

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
        };
        Ok(RequestContext::from_parts(
            header(CORRELATION_HEADER),
            header(USER_HEADER),
        ))
    }
}

/// JSON request body decoded as `T`
///
/// Malformed JSON and schema mismatches (unknown fields, out-of-domain
/// values) are rejected as `Validation`.
#[derive(Debug)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| InventoryError::validation(rejection.body_text()))?;
        let decoded = serde_json::from_value(value).map_err(InventoryError::from)?;
        Ok(Payload(decoded))
    }
}

/// URL path segments decoded as `T`
#[derive(Debug)]
pub struct Params<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Params<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| InventoryError::validation(rejection.body_text()))?;
        Ok(Params(params))
    }
}

/// Depth of link resolution requested by the caller
///
/// Depths beyond the resolver maximum are clamped; a non-numeric depth is
/// rejected as `Validation`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ViewQuery {
    pub depth: Option<u32>,
}

impl ViewQuery {
    /// Requested depth, default 1, clamped to the resolver maximum
    pub fn depth(&self) -> u8 {
        match self.depth {
            None => 1,
            Some(depth) => depth.min(u32::from(MAX_DEPTH)) as u8,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ViewQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<ViewQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| InventoryError::validation(rejection.body_text()))?;
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_is_clamped() {
        assert_eq!(ViewQuery::default().depth(), 1);
        assert_eq!(ViewQuery { depth: Some(0) }.depth(), 0);
        assert_eq!(ViewQuery { depth: Some(9) }.depth(), MAX_DEPTH);
        assert_eq!(ViewQuery { depth: Some(999) }.depth(), MAX_DEPTH);
    }
}
