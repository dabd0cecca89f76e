// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tracing setup and per-request context
//!
//! Every request runs inside a span carrying its correlation id and the
//! calling user, so facade log lines can be tied back to the request
//! without any global logger state.

use tracing::Span;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Header carrying the caller-supplied correlation id
pub const CORRELATION_HEADER: &str = "x-correlation-id";

/// Header carrying the calling user
pub const USER_HEADER: &str = "x-user";

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over `default_filter` when set.
pub fn init_tracing(
    default_filter: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
    }
}

/// Identity of the request a facade call is serving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub correlation_id: String,
    pub user: Option<String>,
}

impl RequestContext {
    /// Context with a fresh correlation id and no user
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::now_v7().to_string(),
            user: None,
        }
    }

    /// Context from optional header values; a missing id is generated
    pub fn from_parts(correlation_id: Option<&str>, user: Option<&str>) -> Self {
        let correlation_id = correlation_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .unwrap_or_else(|| Uuid::now_v7().to_string());
        Self {
            correlation_id,
            user: user.map(String::from),
        }
    }

    /// Span to run the request's work in
    pub fn span(&self) -> Span {
        tracing::info_span!(
            "request",
            correlation_id = %self.correlation_id,
            user = self.user.as_deref().unwrap_or("anonymous"),
        )
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
