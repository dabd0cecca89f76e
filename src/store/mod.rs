// Copyright (c) 2025 - Cowboy AI, Inc.
//! Document Store
//!
//! Persistence of inventory records as JSON documents, one collection per
//! entity type, with sparse unique indexes enforced by the backend.
//!
//! # Architecture
//!
//! ```text
//! Service facades
//!       ↓
//! Repository<T>  (typed records, id/timestamp stamping, diff-and-set patch)
//!       ↓
//! DocumentStore  (object-safe JSON seam)
//!       ↓
//! InMemoryStore | NatsKvStore
//! ```
//!
//! Link resolution (`resolve`) walks references and back-links up to an
//! explicit depth on top of any backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use mpls_inventory::store::{Collection, DocumentStore, InMemoryStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryStore::new();
//! let devices = store.list(Collection::Devices).await?;
//! assert!(devices.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod links;
pub mod memory;
pub mod nats;
pub mod repository;

pub use collection::{
    BackLink, Collection, Document, Link, PATH_STEPS, POLICY_STEPS, TUNNEL_PATHS,
};
pub use links::{resolve, BACKLINK_MARKER, MAX_DEPTH};
pub use memory::InMemoryStore;
pub use nats::NatsKvStore;
pub use repository::{Patch, Repository, UpdateOutcome};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// A stored document: a JSON object carrying its `id`
pub type JsonObject = Map<String, Value>;

/// Errors raised by store backends
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Duplicate key in {collection}: {field} = {value}")]
    DuplicateKey {
        collection: String,
        field: String,
        value: String,
    },

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Batch into {collection} stopped after {written} of {total}: {reason}")]
    PartialBatch {
        collection: String,
        written: usize,
        total: usize,
        reason: String,
    },

    #[error("Corrupt document in {collection}: {id}")]
    CorruptDocument { collection: String, id: String },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Document persistence seam
///
/// Backends guarantee that a unique-index collision rejects the write with
/// [`StoreError::DuplicateKey`] and leaves the collection unchanged.
/// Nothing else is transactional: multi-document sequences are composed
/// by the facades.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new document (must carry an `id`)
    async fn insert(&self, collection: Collection, doc: JsonObject) -> StoreResult<()>;

    /// Persist a batch of new documents
    ///
    /// Every unique index of the batch is checked before the first write.
    async fn insert_many(&self, collection: Collection, docs: Vec<JsonObject>)
        -> StoreResult<usize>;

    /// Load one document by id
    async fn get(&self, collection: Collection, id: Uuid) -> StoreResult<Option<JsonObject>>;

    /// Load every document of a collection, oldest first
    async fn list(&self, collection: Collection) -> StoreResult<Vec<JsonObject>>;

    /// Replace a document wholesale; `false` when the id is unknown
    async fn replace(&self, collection: Collection, doc: JsonObject) -> StoreResult<bool>;

    /// Remove a document; `false` when the id is unknown
    async fn delete(&self, collection: Collection, id: Uuid) -> StoreResult<bool>;

    /// Load the documents matching a filter
    async fn find(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<JsonObject>> {
        Ok(self
            .list(collection)
            .await?
            .into_iter()
            .filter(|doc| filter.matches(doc))
            .collect())
    }

    /// Remove the documents matching a filter, returning how many went
    async fn delete_many(&self, collection: Collection, filter: &Filter) -> StoreResult<usize> {
        let mut deleted = 0;
        for doc in self.find(collection, filter).await? {
            let id = document_id(collection, &doc)?;
            if self.delete(collection, id).await? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}

/// Read the `id` of a stored document
pub fn document_id(collection: Collection, doc: &JsonObject) -> StoreResult<Uuid> {
    doc.get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| StoreError::CorruptDocument {
            collection: collection.name().to_string(),
            id: doc
                .get("id")
                .map(Value::to_string)
                .unwrap_or_else(|| "<missing>".to_string()),
        })
}

/// Unique index entries `(field, canonical value)` of a document
///
/// Indexes are sparse: null and absent values are skipped.
pub fn unique_keys(collection: Collection, doc: &JsonObject) -> Vec<(&'static str, String)> {
    collection
        .unique_fields()
        .iter()
        .filter_map(|field| match doc.get(*field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some((*field, s.clone())),
            Some(other) => Some((*field, other.to_string())),
        })
        .collect()
}

/// Field condition used by [`DocumentStore::find`]
#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Eq(&'static str, Value),
    AnyEq(&'static [&'static str], Value),
    Contains(&'static str, Value),
    InRange(&'static str, i64, i64),
}

impl Condition {
    fn matches(&self, doc: &JsonObject) -> bool {
        let field = |name: &str| doc.get(name).unwrap_or(&Value::Null);
        match self {
            Condition::Eq(name, value) => field(name) == value,
            Condition::AnyEq(names, value) => names.iter().any(|name| field(name) == value),
            Condition::Contains(name, value) => field(name)
                .as_array()
                .is_some_and(|items| items.contains(value)),
            Condition::InRange(name, start, end) => field(name)
                .as_i64()
                .is_some_and(|n| n >= *start && n < *end),
        }
    }
}

/// Conjunction of field conditions
///
/// ```rust
/// use mpls_inventory::store::Filter;
/// use serde_json::json;
///
/// let filter = Filter::new().eq("number", 10).eq("name", "VLAN10");
/// let doc = json!({"number": 10, "name": "VLAN10"});
/// assert!(filter.matches(doc.as_object().unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

fn to_value(value: impl Serialize) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

impl Filter {
    /// Filter matching every document
    pub fn new() -> Self {
        Self::default()
    }

    /// `field == value` (an absent field compares as null)
    pub fn eq(mut self, field: &'static str, value: impl Serialize) -> Self {
        self.conditions.push(Condition::Eq(field, to_value(value)));
        self
    }

    /// Any of `fields` equals `value`
    pub fn any_eq(mut self, fields: &'static [&'static str], value: impl Serialize) -> Self {
        self.conditions.push(Condition::AnyEq(fields, to_value(value)));
        self
    }

    /// Array `field` contains `value`
    pub fn contains(mut self, field: &'static str, value: impl Serialize) -> Self {
        self.conditions
            .push(Condition::Contains(field, to_value(value)));
        self
    }

    /// Integer `field` within `[start, end)`
    pub fn in_range(mut self, field: &'static str, start: i64, end: i64) -> Self {
        self.conditions.push(Condition::InRange(field, start, end));
        self
    }

    /// Whether a document satisfies every condition
    pub fn matches(&self, doc: &JsonObject) -> bool {
        self.conditions.iter().all(|c| c.matches(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_filter_conditions() {
        let doc = object(json!({
            "number": 15,
            "l2domain": "a",
            "vlan": ["x", "y"],
            "step_3": "dev",
        }));

        assert!(Filter::new().eq("l2domain", "a").matches(&doc));
        assert!(!Filter::new().eq("l2domain", "b").matches(&doc));
        assert!(Filter::new().eq("missing", Value::Null).matches(&doc));
        assert!(Filter::new().contains("vlan", "y").matches(&doc));
        assert!(Filter::new().in_range("number", 10, 20).matches(&doc));
        assert!(!Filter::new().in_range("number", 10, 15).matches(&doc));
        assert!(Filter::new().any_eq(&PATH_STEPS, "dev").matches(&doc));
    }

    #[test]
    fn test_unique_keys_are_sparse() {
        let doc = object(json!({"name": "C1", "vc_id": null}));
        assert_eq!(unique_keys(Collection::Circuits, &doc), vec![("name", "C1".to_string())]);

        let doc = object(json!({"name": "C2", "vc_id": 100}));
        assert_eq!(unique_keys(Collection::Circuits, &doc).len(), 2);
    }

    #[test]
    fn test_document_id_rejects_missing_id() {
        let doc = object(json!({"name": "R1"}));
        assert!(matches!(
            document_id(Collection::Devices, &doc),
            Err(StoreError::CorruptDocument { .. })
        ));
    }
}
