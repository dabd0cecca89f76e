// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory document store

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{
    document_id, unique_keys, Collection, DocumentStore, JsonObject, StoreError, StoreResult,
};

#[derive(Debug, Default)]
struct CollectionState {
    /// Keyed by UUID v7, so iteration is insertion ordered
    docs: BTreeMap<Uuid, JsonObject>,
    unique: HashMap<(&'static str, String), Uuid>,
}

impl CollectionState {
    fn check_unique(
        &self,
        collection: Collection,
        id: Uuid,
        keys: &[(&'static str, String)],
    ) -> StoreResult<()> {
        for (field, value) in keys {
            if let Some(owner) = self.unique.get(&(*field, value.clone())) {
                if *owner != id {
                    return Err(duplicate(collection, field, value));
                }
            }
        }
        Ok(())
    }

    fn claim(&mut self, id: Uuid, keys: Vec<(&'static str, String)>) {
        for key in keys {
            self.unique.insert(key, id);
        }
    }

    fn release(&mut self, id: Uuid, keys: Vec<(&'static str, String)>) {
        for key in keys {
            if self.unique.get(&key) == Some(&id) {
                self.unique.remove(&key);
            }
        }
    }
}

fn duplicate(collection: Collection, field: &str, value: &str) -> StoreError {
    StoreError::DuplicateKey {
        collection: collection.name().to_string(),
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// Process-local store used by tests and the `memory` backend
///
/// One write lock covers the unique check and the write, so collisions
/// are detected atomically with respect to concurrent writers.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<Collection, CollectionState>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert(&self, collection: Collection, doc: JsonObject) -> StoreResult<()> {
        let id = document_id(collection, &doc)?;
        let keys = unique_keys(collection, &doc);

        let mut collections = self.collections.write().await;
        let state = collections.entry(collection).or_default();

        if state.docs.contains_key(&id) {
            return Err(duplicate(collection, "id", &id.to_string()));
        }
        state.check_unique(collection, id, &keys)?;
        state.claim(id, keys);
        state.docs.insert(id, doc);

        debug!(collection = %collection, %id, "Inserted document");
        Ok(())
    }

    async fn insert_many(
        &self,
        collection: Collection,
        docs: Vec<JsonObject>,
    ) -> StoreResult<usize> {
        let mut prepared = Vec::with_capacity(docs.len());
        for doc in docs {
            let id = document_id(collection, &doc)?;
            let keys = unique_keys(collection, &doc);
            prepared.push((id, keys, doc));
        }

        let mut collections = self.collections.write().await;
        let state = collections.entry(collection).or_default();

        let mut batch: HashMap<(&'static str, String), Uuid> = HashMap::new();
        for (id, keys, _) in &prepared {
            if state.docs.contains_key(id) {
                return Err(duplicate(collection, "id", &id.to_string()));
            }
            state.check_unique(collection, *id, keys)?;
            for (field, value) in keys {
                if batch.insert((*field, value.clone()), *id).is_some() {
                    return Err(duplicate(collection, field, value));
                }
            }
        }

        let count = prepared.len();
        for (id, keys, doc) in prepared {
            state.claim(id, keys);
            state.docs.insert(id, doc);
        }

        debug!(collection = %collection, count, "Inserted batch");
        Ok(count)
    }

    async fn get(&self, collection: Collection, id: Uuid) -> StoreResult<Option<JsonObject>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|state| state.docs.get(&id))
            .cloned())
    }

    async fn list(&self, collection: Collection) -> StoreResult<Vec<JsonObject>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|state| state.docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn replace(&self, collection: Collection, doc: JsonObject) -> StoreResult<bool> {
        let id = document_id(collection, &doc)?;
        let keys = unique_keys(collection, &doc);

        let mut collections = self.collections.write().await;
        let state = collections.entry(collection).or_default();

        let Some(current) = state.docs.get(&id) else {
            return Ok(false);
        };
        let previous = unique_keys(collection, current);

        state.check_unique(collection, id, &keys)?;
        state.release(id, previous);
        state.claim(id, keys);
        state.docs.insert(id, doc);

        debug!(collection = %collection, %id, "Replaced document");
        Ok(true)
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(state) = collections.get_mut(&collection) else {
            return Ok(false);
        };

        match state.docs.remove(&id) {
            Some(doc) => {
                let keys = unique_keys(collection, &doc);
                state.release(id, keys);
                debug!(collection = %collection, %id, "Deleted document");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Filter;
    use serde_json::{json, Value};

    fn doc(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn named(id: Uuid, name: &str) -> JsonObject {
        doc(json!({"id": id.to_string(), "name": name}))
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryStore::new();
        let id = Uuid::now_v7();
        store.insert(Collection::Vendors, named(id, "Nokia")).await.unwrap();

        let loaded = store.get(Collection::Vendors, id).await.unwrap().unwrap();
        assert_eq!(loaded["name"], "Nokia");
        assert!(store.get(Collection::Devices, id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unique_name_collision() {
        let store = InMemoryStore::new();
        store
            .insert(Collection::Vendors, named(Uuid::now_v7(), "Nokia"))
            .await
            .unwrap();

        let err = store
            .insert(Collection::Vendors, named(Uuid::now_v7(), "Nokia"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateKey {
                collection: "vendors".to_string(),
                field: "name".to_string(),
                value: "Nokia".to_string(),
            }
        );
        assert_eq!(store.list(Collection::Vendors).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_null_values_are_not_indexed() {
        let store = InMemoryStore::new();
        for _ in 0..2 {
            let circuit = doc(json!({"id": Uuid::now_v7().to_string(), "name": null, "vc_id": null}));
            store.insert(Collection::Circuits, circuit).await.unwrap();
        }
        assert_eq!(store.list(Collection::Circuits).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_insert_many_is_all_or_nothing() {
        let store = InMemoryStore::new();
        store
            .insert(Collection::Paths, named(Uuid::now_v7(), "PATH-B"))
            .await
            .unwrap();

        let batch = vec![
            named(Uuid::now_v7(), "PATH-A"),
            named(Uuid::now_v7(), "PATH-B"),
        ];
        assert!(store.insert_many(Collection::Paths, batch).await.is_err());
        assert_eq!(store.list(Collection::Paths).await.unwrap().len(), 1);

        let batch = vec![
            named(Uuid::now_v7(), "PATH-C"),
            named(Uuid::now_v7(), "PATH-C"),
        ];
        assert!(store.insert_many(Collection::Paths, batch).await.is_err());
        assert_eq!(store.list(Collection::Paths).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_replace_moves_index_claims() {
        let store = InMemoryStore::new();
        let first = Uuid::now_v7();
        let second = Uuid::now_v7();
        store.insert(Collection::Vendors, named(first, "A")).await.unwrap();
        store.insert(Collection::Vendors, named(second, "B")).await.unwrap();

        assert!(store
            .replace(Collection::Vendors, named(second, "A"))
            .await
            .is_err());

        assert!(store.replace(Collection::Vendors, named(first, "C")).await.unwrap());
        assert!(store.replace(Collection::Vendors, named(second, "A")).await.unwrap());
        assert!(!store
            .replace(Collection::Vendors, named(Uuid::now_v7(), "D"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_delete_releases_unique_claims() {
        let store = InMemoryStore::new();
        let id = Uuid::now_v7();
        store.insert(Collection::Vendors, named(id, "A")).await.unwrap();
        assert!(store.delete(Collection::Vendors, id).await.unwrap());
        assert!(!store.delete(Collection::Vendors, id).await.unwrap());

        store
            .insert(Collection::Vendors, named(Uuid::now_v7(), "A"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_find_and_delete_many() {
        let store = InMemoryStore::new();
        let domain = Uuid::now_v7().to_string();
        for number in 10..15 {
            let vlan = doc(json!({"id": Uuid::now_v7().to_string(), "number": number, "l2domain": domain}));
            store.insert(Collection::Vlans, vlan).await.unwrap();
        }

        let filter = Filter::new().eq("l2domain", &domain).in_range("number", 11, 13);
        assert_eq!(store.find(Collection::Vlans, &filter).await.unwrap().len(), 2);
        assert_eq!(store.delete_many(Collection::Vlans, &filter).await.unwrap(), 2);
        assert_eq!(store.list(Collection::Vlans).await.unwrap().len(), 3);
    }
}
