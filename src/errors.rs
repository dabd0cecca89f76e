// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for inventory operations

use thiserror::Error;

use crate::domain::{NetworkError, ValidationError};
use crate::state_machine::TransitionError;
use crate::store::{Collection, StoreError};

/// Errors surfaced by the inventory facades
///
/// Every facade operation maps store-level failures into this taxonomy.
/// `Internal` carries detail for the logs only; the API layer never
/// renders its payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Referenced id or key is absent
    #[error("{entity} {key} not found!")]
    NotFound { entity: String, key: String },

    /// Unique constraint violation
    #[error("{entity} {key} already exists!")]
    AlreadyExists { entity: String, key: String },

    /// Value out of domain (VLAN number, range bounds, enum literal, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business precondition not met
    #[error("{0}")]
    Domain(String),

    /// Multi-step operation failed part way through
    #[error("{operation} stopped after {completed} of {total} steps: {reason}")]
    Incomplete {
        operation: String,
        completed: usize,
        total: usize,
        reason: String,
    },

    /// Unexpected failure
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

impl InventoryError {
    /// Build a `NotFound` for an entity name and key
    pub fn not_found(entity: impl Into<String>, key: impl ToString) -> Self {
        InventoryError::NotFound {
            entity: entity.into(),
            key: key.to_string(),
        }
    }

    /// Build an `AlreadyExists` for an entity name and key
    pub fn already_exists(entity: impl Into<String>, key: impl ToString) -> Self {
        InventoryError::AlreadyExists {
            entity: entity.into(),
            key: key.to_string(),
        }
    }

    /// Build a `Validation` error
    pub fn validation(message: impl Into<String>) -> Self {
        InventoryError::Validation(message.into())
    }

    /// Build a `Domain` error
    pub fn domain(message: impl Into<String>) -> Self {
        InventoryError::Domain(message.into())
    }

    /// Stable kind name, used in logs and tests
    pub fn kind(&self) -> &'static str {
        match self {
            InventoryError::NotFound { .. } => "not_found",
            InventoryError::AlreadyExists { .. } => "already_exists",
            InventoryError::Validation(_) => "validation",
            InventoryError::Domain(_) => "domain",
            InventoryError::Incomplete { .. } => "incomplete",
            InventoryError::Internal(_) => "internal",
        }
    }
}

impl From<StoreError> for InventoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey {
                collection, value, ..
            } => InventoryError::AlreadyExists {
                entity: Collection::from_name(&collection)
                    .map(|c| c.entity().to_string())
                    .unwrap_or(collection),
                key: value,
            },
            StoreError::PartialBatch {
                collection,
                written,
                total,
                reason,
            } => InventoryError::Incomplete {
                operation: format!("insert into {collection}"),
                completed: written,
                total,
                reason,
            },
            other => InventoryError::Internal(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::Validation(err.to_string())
    }
}

impl From<NetworkError> for InventoryError {
    fn from(err: NetworkError) -> Self {
        InventoryError::Validation(err.to_string())
    }
}

impl From<ValidationError> for InventoryError {
    fn from(err: ValidationError) -> Self {
        InventoryError::Validation(err.to_string())
    }
}

impl From<TransitionError> for InventoryError {
    fn from(err: TransitionError) -> Self {
        InventoryError::Domain(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_maps_to_already_exists() {
        let err: InventoryError = StoreError::DuplicateKey {
            collection: "devices".to_string(),
            field: "name".to_string(),
            value: "R1".to_string(),
        }
        .into();
        assert_eq!(err, InventoryError::already_exists("Device", "R1"));
        assert_eq!(err.to_string(), "Device R1 already exists!");
    }

    #[test]
    fn test_backend_error_maps_to_internal() {
        let err: InventoryError = StoreError::Backend("connection reset".to_string()).into();
        assert_eq!(err.kind(), "internal");
    }

    #[test]
    fn test_partial_batch_maps_to_incomplete() {
        let err: InventoryError = StoreError::PartialBatch {
            collection: "vlans".to_string(),
            written: 3,
            total: 10,
            reason: "timeout".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            InventoryError::Incomplete {
                completed: 3,
                total: 10,
                ..
            }
        ));
    }

    #[test]
    fn test_not_found_display() {
        let err = InventoryError::not_found("device", "abc");
        assert_eq!(err.to_string(), "device abc not found!");
    }
}
