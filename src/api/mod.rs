// Copyright (c) 2025 - Cowboy AI, Inc.
//! HTTP Surface
//!
//! axum router exposing the facades under `/ipam`. Handlers decode the
//! request, run the facade call inside the request span, and wrap the
//! result in an [`Envelope`].
//!
//! # Architecture
//!
//! ```text
//! HTTP request
//!     ↓
//! TraceLayer → CorsLayer → route handler
//!     ↓                      (RequestContext span, Params, Payload, ViewQuery)
//! Inventory facades
//!     ↓
//! ApiResponse | ApiError → Envelope
//! ```
//!
//! # Status Codes
//!
//! | Outcome | Status |
//! |---|---|
//! | created | 201 |
//! | read, update, delete | 200 |
//! | `NotFound` | 404 |
//! | `AlreadyExists` | 409 |
//! | `Validation`, `Domain` | 422 |
//! | `Incomplete`, `Internal` | 500 |

pub mod envelope;
pub mod extract;
pub mod routes;
pub mod serialize;

pub use envelope::{ApiError, ApiResponse, ApiResult, Envelope, Status};
pub use extract::{Params, Payload, ViewQuery};
pub use serialize::strip_placeholders;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::service::Inventory;

/// Path prefix of every route
pub const BASE_PATH: &str = "/ipam";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub inventory: Inventory,
}

/// CORS policy for the configured origins; unparsable origins are skipped
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Full application router
pub fn router(inventory: Inventory, allowed_origins: &[String]) -> Router {
    let ipam = Router::new()
        .merge(routes::facilities::routes())
        .merge(routes::devices::routes())
        .merge(routes::interfaces::routes())
        .merge(routes::addressing::routes())
        .merge(routes::topology::routes());

    Router::new()
        .nest(BASE_PATH, ipam)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { inventory })
}
