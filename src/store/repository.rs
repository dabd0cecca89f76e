// Copyright (c) 2025 - Cowboy AI, Inc.
//! Typed repository over a document store
//!
//! `Repository<T>` converts between records and JSON documents, stamps ids
//! and timestamps, and implements the diff-and-set partial update: only
//! fields present in a [`Patch`] are considered, only fields whose value
//! actually differs are written, and a patch that changes nothing skips
//! the write entirely.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::{
    links, Collection, Document, DocumentStore, Filter, JsonObject, StoreError, StoreResult,
};
use crate::errors::{InventoryError, InventoryResult};

/// Fields a patch may never overwrite
const PROTECTED_FIELDS: [&str; 4] = ["id", "_id", "created_at", "updated_at"];

/// Partial update payload: the fields explicitly provided by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch(JsonObject);

impl Patch {
    /// Empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a patch from a JSON object
    pub fn from_value(value: Value) -> InventoryResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            Value::Null => Ok(Self::default()),
            other => Err(InventoryError::validation(format!(
                "update payload must be an object, got {other}"
            ))),
        }
    }

    /// Set a field
    pub fn set(mut self, field: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.0.insert(field.into(), value);
        self
    }

    /// Drop a field from the patch, returning it
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Whether the patch names `field`
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Provided value of `field`
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Whether no field is provided
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge the patch into `current`
    ///
    /// Protected fields are ignored; a field is only overwritten when its
    /// value differs from the current one.
    pub fn apply(&self, current: &JsonObject) -> JsonObject {
        let mut merged = current.clone();
        for (field, value) in &self.0 {
            if PROTECTED_FIELDS.contains(&field.as_str()) {
                continue;
            }
            if current.get(field) != Some(value) {
                merged.insert(field.clone(), value.clone());
            }
        }
        merged
    }
}

/// Result of a partial update
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome<T> {
    /// Record as persisted
    pub record: T,
    /// Fields whose stored value changed
    pub changed: Vec<String>,
}

impl<T> UpdateOutcome<T> {
    /// Whether anything was written
    pub fn is_changed(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// Typed access to the collection of `T`
pub struct Repository<T: Document> {
    store: Arc<dyn DocumentStore>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Document> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _record: PhantomData,
        }
    }
}

fn now() -> Value {
    serde_json::to_value(Utc::now()).unwrap_or(Value::Null)
}

impl<T: Document> Repository<T> {
    /// Create a repository over a shared store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Collection of `T`
    pub fn collection(&self) -> Collection {
        T::COLLECTION
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    fn to_object(record: &T) -> StoreResult<JsonObject> {
        match serde_json::to_value(record)? {
            Value::Object(doc) => Ok(doc),
            _ => Err(StoreError::Serialization(format!(
                "{} record is not a JSON object",
                T::COLLECTION
            ))),
        }
    }

    fn from_object(doc: JsonObject) -> StoreResult<T> {
        let id = doc
            .get("id")
            .map(Value::to_string)
            .unwrap_or_default();
        serde_json::from_value(Value::Object(doc)).map_err(|_| StoreError::CorruptDocument {
            collection: T::COLLECTION.name().to_string(),
            id,
        })
    }

    fn stamp_new(record: &T) -> StoreResult<JsonObject> {
        let mut doc = Self::to_object(record)?;
        doc.insert("id".to_string(), Value::String(Uuid::now_v7().to_string()));
        let stamp = now();
        if T::COLLECTION.stamps_created() {
            doc.insert("created_at".to_string(), stamp.clone());
        }
        if T::COLLECTION.stamps_updated() {
            doc.insert("updated_at".to_string(), stamp);
        }
        Ok(doc)
    }

    /// Persist a new record under a fresh UUID v7 id
    pub async fn insert(&self, record: &T) -> StoreResult<T> {
        let doc = Self::stamp_new(record)?;
        self.store.insert(T::COLLECTION, doc.clone()).await?;
        Self::from_object(doc)
    }

    /// Persist a batch of new records; unique collisions reject the whole batch
    pub async fn insert_many(&self, records: &[T]) -> StoreResult<Vec<T>> {
        let docs = records
            .iter()
            .map(Self::stamp_new)
            .collect::<StoreResult<Vec<_>>>()?;
        self.store.insert_many(T::COLLECTION, docs.clone()).await?;
        docs.into_iter().map(Self::from_object).collect()
    }

    /// Load a record
    pub async fn get(&self, id: Uuid) -> StoreResult<Option<T>> {
        self.store
            .get(T::COLLECTION, id)
            .await?
            .map(Self::from_object)
            .transpose()
    }

    /// Load a record or fail with `NotFound`
    pub async fn require(&self, id: Uuid) -> InventoryResult<T> {
        self.get(id)
            .await?
            .ok_or_else(|| InventoryError::not_found(T::COLLECTION.entity(), id))
    }

    /// Whether a record exists
    pub async fn exists(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.store.get(T::COLLECTION, id).await?.is_some())
    }

    /// Load every record
    pub async fn list(&self) -> StoreResult<Vec<T>> {
        self.store
            .list(T::COLLECTION)
            .await?
            .into_iter()
            .map(Self::from_object)
            .collect()
    }

    /// Load the records matching a filter
    pub async fn find(&self, filter: &Filter) -> StoreResult<Vec<T>> {
        self.store
            .find(T::COLLECTION, filter)
            .await?
            .into_iter()
            .map(Self::from_object)
            .collect()
    }

    /// Replace a record wholesale, stamping `updated_at`
    pub async fn save(&self, record: &T) -> InventoryResult<T> {
        let mut doc = Self::to_object(record)?;
        if T::COLLECTION.stamps_updated() {
            doc.insert("updated_at".to_string(), now());
        }
        if !self.store.replace(T::COLLECTION, doc.clone()).await? {
            return Err(InventoryError::not_found(T::COLLECTION.entity(), record.id()));
        }
        Ok(Self::from_object(doc)?)
    }

    /// Current record and the record `patch` would produce, without writing
    ///
    /// Facades use this to check cross-entity rules before [`update`].
    ///
    /// [`update`]: Repository::update
    pub async fn preview(&self, id: Uuid, patch: &Patch) -> InventoryResult<(T, T)> {
        let current = self
            .store
            .get(T::COLLECTION, id)
            .await?
            .ok_or_else(|| InventoryError::not_found(T::COLLECTION.entity(), id))?;
        let merged: T = serde_json::from_value(Value::Object(patch.apply(&current)))?;
        Ok((Self::from_object(current)?, merged))
    }

    /// Diff-and-set partial update
    ///
    /// The merged document is validated by decoding it as `T`, so unknown
    /// fields and out-of-domain values fail with `Validation` and nothing
    /// is written.
    pub async fn update(&self, id: Uuid, patch: &Patch) -> InventoryResult<UpdateOutcome<T>> {
        let current = self
            .store
            .get(T::COLLECTION, id)
            .await?
            .ok_or_else(|| InventoryError::not_found(T::COLLECTION.entity(), id))?;

        let merged = patch.apply(&current);
        let record: T = serde_json::from_value(Value::Object(merged))?;
        let mut next = Self::to_object(&record)?;

        let changed: Vec<String> = next
            .iter()
            .filter(|(field, value)| current.get(field.as_str()) != Some(*value))
            .map(|(field, _)| field.clone())
            .collect();

        if changed.is_empty() {
            debug!(collection = %T::COLLECTION, %id, "Update changed nothing");
            return Ok(UpdateOutcome {
                record: Self::from_object(current)?,
                changed,
            });
        }

        if T::COLLECTION.stamps_updated() {
            next.insert("updated_at".to_string(), now());
        }
        if !self.store.replace(T::COLLECTION, next.clone()).await? {
            return Err(InventoryError::not_found(T::COLLECTION.entity(), id));
        }

        debug!(collection = %T::COLLECTION, %id, fields = ?changed, "Updated document");
        Ok(UpdateOutcome {
            record: Self::from_object(next)?,
            changed,
        })
    }

    /// Remove a record
    pub async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.store.delete(T::COLLECTION, id).await
    }

    /// Remove the records matching a filter
    pub async fn delete_many(&self, filter: &Filter) -> StoreResult<usize> {
        self.store.delete_many(T::COLLECTION, filter).await
    }

    /// Load a record with its links resolved to `depth`
    pub async fn view(&self, id: Uuid, depth: u8) -> InventoryResult<Value> {
        let doc = self
            .store
            .get(T::COLLECTION, id)
            .await?
            .ok_or_else(|| InventoryError::not_found(T::COLLECTION.entity(), id))?;
        Ok(links::resolve(self.store.as_ref(), T::COLLECTION, doc, depth).await?)
    }

    /// Resolve a list of already loaded records to `depth`
    pub async fn view_records(&self, records: &[T], depth: u8) -> InventoryResult<Vec<Value>> {
        let mut views = Vec::with_capacity(records.len());
        for record in records {
            let doc = Self::to_object(record)?;
            views.push(links::resolve(self.store.as_ref(), T::COLLECTION, doc, depth).await?);
        }
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_skips_protected_and_equal_fields() {
        let current = json!({"id": "a", "name": "R1", "model": "MX"})
            .as_object()
            .cloned()
            .unwrap();
        let patch = Patch::new()
            .set("id", "b")
            .set("created_at", "2020-01-01T00:00:00Z")
            .set("name", "R1")
            .set("model", "PTX");

        let merged = patch.apply(&current);
        assert_eq!(merged["id"], "a");
        assert_eq!(merged["name"], "R1");
        assert_eq!(merged["model"], "PTX");
        assert!(!merged.contains_key("created_at"));
    }

    #[test]
    fn test_patch_from_value_requires_object() {
        assert!(Patch::from_value(json!({"name": "x"})).is_ok());
        assert!(Patch::from_value(Value::Null).unwrap().is_empty());
        assert!(Patch::from_value(json!([1, 2])).is_err());
    }
}
