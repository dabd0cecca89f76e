// Copyright (c) 2025 - Cowboy AI, Inc.
//! NATS JetStream key-value document store
//!
//! Each collection lives in its own KV bucket `{prefix}_{collection}`:
//!
//! - `doc.{id}` holds the JSON document
//! - `unique.{field}.{hex(value)}` holds the id owning that unique value
//!
//! Unique values are claimed with a revision-checked KV `update`: revision 0
//! only succeeds when the key has never been written, and a released claim
//! (a delete tombstone) is taken over at the tombstone's revision. A claim
//! that loses the race surfaces as [`StoreError::DuplicateKey`].

use async_nats::jetstream::kv::{Config as KvConfig, Operation, Store as KvStore};
use async_nats::jetstream::Context as JetStreamContext;
use async_trait::async_trait;
use futures::TryStreamExt;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    document_id, unique_keys, Collection, DocumentStore, JsonObject, StoreError, StoreResult,
};

const DOC_PREFIX: &str = "doc.";

fn backend(err: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn doc_key(id: Uuid) -> String {
    format!("{DOC_PREFIX}{id}")
}

/// KV keys only allow a restricted alphabet, so values are hex encoded
fn index_key(field: &str, value: &str) -> String {
    let hex: String = value.bytes().map(|b| format!("{b:02x}")).collect();
    format!("unique.{field}.{hex}")
}

/// Document store backed by JetStream KV buckets
pub struct NatsKvStore {
    jetstream: JetStreamContext,
    prefix: String,
    buckets: RwLock<HashMap<Collection, KvStore>>,
}

impl NatsKvStore {
    /// Create a store over a JetStream context
    ///
    /// Buckets are opened (or created) lazily on first use.
    pub fn new(jetstream: JetStreamContext, prefix: impl Into<String>) -> Self {
        Self {
            jetstream,
            prefix: prefix.into(),
            buckets: RwLock::new(HashMap::new()),
        }
    }

    /// Bucket name of a collection
    pub fn bucket_name(&self, collection: Collection) -> String {
        format!("{}_{}", self.prefix, collection.name())
    }

    async fn bucket(&self, collection: Collection) -> StoreResult<KvStore> {
        if let Some(kv) = self.buckets.read().await.get(&collection) {
            return Ok(kv.clone());
        }

        let mut buckets = self.buckets.write().await;
        if let Some(kv) = buckets.get(&collection) {
            return Ok(kv.clone());
        }

        let name = self.bucket_name(collection);
        let kv = match self.jetstream.get_key_value(&name).await {
            Ok(kv) => kv,
            Err(_) => {
                let kv = self
                    .jetstream
                    .create_key_value(KvConfig {
                        bucket: name.clone(),
                        history: 1,
                        ..Default::default()
                    })
                    .await
                    .map_err(backend)?;
                info!(bucket = %name, "Created KV bucket");
                kv
            }
        };

        buckets.insert(collection, kv.clone());
        Ok(kv)
    }

    async fn load(&self, kv: &KvStore, collection: Collection, id: Uuid) -> StoreResult<Option<JsonObject>> {
        match kv.get(doc_key(id)).await.map_err(backend)? {
            Some(bytes) => {
                let doc = serde_json::from_slice(&bytes).map_err(|_| StoreError::CorruptDocument {
                    collection: collection.name().to_string(),
                    id: id.to_string(),
                })?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    /// Take `key` for `id` unless another live owner holds it
    ///
    /// `Some(true)` when the key was written, `Some(false)` when `id` already
    /// owned it, `None` when another document holds it.
    async fn claim_key(&self, kv: &KvStore, key: &str, id: Uuid) -> StoreResult<Option<bool>> {
        let owner = id.to_string().into_bytes();
        if kv.update(key, owner.clone().into(), 0).await.is_ok() {
            return Ok(Some(true));
        }

        match kv.entry(key).await.map_err(backend)? {
            Some(entry) if entry.operation == Operation::Put => {
                Ok((entry.value.as_ref() == owner.as_slice()).then_some(false))
            }
            Some(entry) => match kv.update(key, owner.into(), entry.revision).await {
                Ok(_) => Ok(Some(true)),
                // Someone else reclaimed the tombstone first
                Err(_) => Ok(None),
            },
            None => Err(backend(format!("claim of {key} rejected"))),
        }
    }

    /// Claim every unique value for `id`, releasing partial claims on failure
    async fn claim(
        &self,
        kv: &KvStore,
        collection: Collection,
        id: Uuid,
        keys: &[(&'static str, String)],
    ) -> StoreResult<()> {
        let mut claimed = Vec::new();
        for (field, value) in keys {
            let key = index_key(field, value);
            match self.claim_key(kv, &key, id).await {
                Ok(Some(true)) => claimed.push(key),
                Ok(Some(false)) => {}
                Ok(None) => {
                    self.release(kv, &claimed).await;
                    return Err(StoreError::DuplicateKey {
                        collection: collection.name().to_string(),
                        field: field.to_string(),
                        value: value.clone(),
                    });
                }
                Err(err) => {
                    self.release(kv, &claimed).await;
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    async fn release(&self, kv: &KvStore, keys: &[String]) {
        for key in keys {
            if let Err(err) = kv.delete(key).await {
                warn!(%key, error = %err, "Failed to release unique claim");
            }
        }
    }
}

#[async_trait]
impl DocumentStore for NatsKvStore {
    async fn insert(&self, collection: Collection, doc: JsonObject) -> StoreResult<()> {
        let kv = self.bucket(collection).await?;
        let id = document_id(collection, &doc)?;

        if self.load(&kv, collection, id).await?.is_some() {
            return Err(StoreError::DuplicateKey {
                collection: collection.name().to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            });
        }

        let keys = unique_keys(collection, &doc);
        self.claim(&kv, collection, id, &keys).await?;

        let payload = serde_json::to_vec(&doc)?;
        if let Err(err) = kv.put(doc_key(id), payload.into()).await {
            let claimed: Vec<String> = keys.iter().map(|(f, v)| index_key(f, v)).collect();
            self.release(&kv, &claimed).await;
            return Err(backend(err));
        }

        debug!(collection = %collection, %id, "Inserted document");
        Ok(())
    }

    async fn insert_many(
        &self,
        collection: Collection,
        docs: Vec<JsonObject>,
    ) -> StoreResult<usize> {
        let kv = self.bucket(collection).await?;

        // Claim the whole batch before writing any document
        let mut prepared = Vec::with_capacity(docs.len());
        let mut claimed = Vec::new();
        for doc in docs {
            let id = document_id(collection, &doc)?;
            let keys = unique_keys(collection, &doc);
            if let Err(err) = self.claim(&kv, collection, id, &keys).await {
                self.release(&kv, &claimed).await;
                return Err(err);
            }
            claimed.extend(keys.iter().map(|(f, v)| index_key(f, v)));
            prepared.push((id, doc));
        }

        let total = prepared.len();
        for (written, (id, doc)) in prepared.into_iter().enumerate() {
            let payload = serde_json::to_vec(&doc)?;
            kv.put(doc_key(id), payload.into())
                .await
                .map_err(|err| StoreError::PartialBatch {
                    collection: collection.name().to_string(),
                    written,
                    total,
                    reason: err.to_string(),
                })?;
        }

        debug!(collection = %collection, count = total, "Inserted batch");
        Ok(total)
    }

    async fn get(&self, collection: Collection, id: Uuid) -> StoreResult<Option<JsonObject>> {
        let kv = self.bucket(collection).await?;
        self.load(&kv, collection, id).await
    }

    async fn list(&self, collection: Collection) -> StoreResult<Vec<JsonObject>> {
        let kv = self.bucket(collection).await?;
        let keys: Vec<String> = kv
            .keys()
            .await
            .map_err(backend)?
            .try_collect()
            .await
            .map_err(backend)?;

        let mut ids: Vec<Uuid> = keys
            .iter()
            .filter_map(|key| key.strip_prefix(DOC_PREFIX))
            .filter_map(|id| Uuid::parse_str(id).ok())
            .collect();
        ids.sort();

        let mut docs = Vec::with_capacity(ids.len());
        for id in ids {
            // Deleted between the key scan and the read
            if let Some(doc) = self.load(&kv, collection, id).await? {
                docs.push(doc);
            }
        }
        Ok(docs)
    }

    async fn replace(&self, collection: Collection, doc: JsonObject) -> StoreResult<bool> {
        let kv = self.bucket(collection).await?;
        let id = document_id(collection, &doc)?;

        let Some(current) = self.load(&kv, collection, id).await? else {
            return Ok(false);
        };

        let previous = unique_keys(collection, &current);
        let next = unique_keys(collection, &doc);
        let added: Vec<_> = next
            .iter()
            .filter(|key| !previous.contains(key))
            .cloned()
            .collect();
        self.claim(&kv, collection, id, &added).await?;

        let payload = serde_json::to_vec(&doc)?;
        kv.put(doc_key(id), payload.into()).await.map_err(backend)?;

        let stale: Vec<String> = previous
            .iter()
            .filter(|key| !next.contains(key))
            .map(|(f, v)| index_key(f, v))
            .collect();
        self.release(&kv, &stale).await;

        debug!(collection = %collection, %id, "Replaced document");
        Ok(true)
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> StoreResult<bool> {
        let kv = self.bucket(collection).await?;
        let Some(current) = self.load(&kv, collection, id).await? else {
            return Ok(false);
        };

        kv.delete(doc_key(id)).await.map_err(backend)?;
        let keys: Vec<String> = unique_keys(collection, &current)
            .iter()
            .map(|(f, v)| index_key(f, v))
            .collect();
        self.release(&kv, &keys).await;

        debug!(collection = %collection, %id, "Deleted document");
        Ok(true)
    }
}
