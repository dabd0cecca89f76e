// Copyright (c) 2025 - Cowboy AI, Inc.
//! Depth-bounded link resolution
//!
//! References are stored as ids. Resolving a document at depth `n`
//! replaces every reference with the referenced document (itself resolved
//! at `n - 1`) and fills back-link fields with the documents pointing at
//! it. A reference whose target has disappeared resolves to `null`, so a
//! concurrent delete never fails the read.
//!
//! Back-links that are not resolved (depth exhausted) are emitted as a
//! `{"$backlink": "<collection>"}` placeholder. The API serializer strips
//! those before encoding.

use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};
use uuid::Uuid;

use super::{document_id, Collection, DocumentStore, Filter, JsonObject, StoreResult};

/// Deepest nesting the resolver will follow
pub const MAX_DEPTH: u8 = 3;

/// Key of an unresolved back-link placeholder
pub const BACKLINK_MARKER: &str = "$backlink";

fn reference(value: &Value) -> Option<Uuid> {
    value.as_str().and_then(|s| Uuid::parse_str(s).ok())
}

/// Resolve the links of `doc` up to `depth` hops (clamped to [`MAX_DEPTH`])
pub fn resolve<'a>(
    store: &'a dyn DocumentStore,
    collection: Collection,
    doc: JsonObject,
    depth: u8,
) -> BoxFuture<'a, StoreResult<Value>> {
    let depth = depth.min(MAX_DEPTH);
    async move {
        let mut doc = doc;

        for back in collection.back_links() {
            let value = if depth == 0 {
                json!({ BACKLINK_MARKER: back.source.name() })
            } else {
                let id = document_id(collection, &doc)?;
                let filter = Filter::new().any_eq(back.via, id.to_string());
                let mut related = Vec::new();
                for source in store.find(back.source, &filter).await? {
                    related.push(resolve(store, back.source, source, depth - 1).await?);
                }
                Value::Array(related)
            };
            doc.insert(back.field.to_string(), value);
        }

        if depth == 0 {
            return Ok(Value::Object(doc));
        }

        for link in collection.links() {
            let Some(current) = doc.get(link.field).cloned() else {
                continue;
            };

            let resolved = if link.many {
                let mut items = Vec::new();
                for id in current.as_array().into_iter().flatten().filter_map(reference) {
                    if let Some(target) = store.get(link.target, id).await? {
                        items.push(resolve(store, link.target, target, depth - 1).await?);
                    }
                }
                Value::Array(items)
            } else {
                match reference(&current) {
                    Some(id) => match store.get(link.target, id).await? {
                        Some(target) => resolve(store, link.target, target, depth - 1).await?,
                        None => Value::Null,
                    },
                    None => Value::Null,
                }
            };
            doc.insert(link.field.to_string(), resolved);
        }

        Ok(Value::Object(doc))
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn object(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    async fn seed(store: &InMemoryStore) -> (Uuid, Uuid, Uuid) {
        let location = Uuid::now_v7();
        let device = Uuid::now_v7();
        let interface = Uuid::now_v7();
        store
            .insert(Collection::Locations, object(json!({"id": location.to_string(), "name": "POA"})))
            .await
            .unwrap();
        store
            .insert(
                Collection::Devices,
                object(json!({"id": device.to_string(), "name": "R1", "location": location.to_string(), "vendor": null})),
            )
            .await
            .unwrap();
        store
            .insert(
                Collection::Interfaces,
                object(json!({"id": interface.to_string(), "name": "ge-0/0/1", "device": device.to_string(), "vlan": []})),
            )
            .await
            .unwrap();
        (location, device, interface)
    }

    #[tokio::test]
    async fn test_depth_zero_leaves_ids_and_placeholders() {
        let store = InMemoryStore::new();
        let (location, device, _) = seed(&store).await;
        let doc = store.get(Collection::Devices, device).await.unwrap().unwrap();

        let view = resolve(&store, Collection::Devices, doc, 0).await.unwrap();
        assert_eq!(view["location"], json!(location.to_string()));
        assert_eq!(view["physical_interface"], json!({"$backlink": "interfaces"}));
    }

    #[tokio::test]
    async fn test_depth_one_resolves_links_and_back_links() {
        let store = InMemoryStore::new();
        let (_, device, interface) = seed(&store).await;
        let doc = store.get(Collection::Devices, device).await.unwrap().unwrap();

        let view = resolve(&store, Collection::Devices, doc, 1).await.unwrap();
        assert_eq!(view["location"]["name"], "POA");
        assert_eq!(view["vendor"], Value::Null);
        assert_eq!(view["physical_interface"][0]["id"], json!(interface.to_string()));
        // Nested documents stay unresolved at depth 0
        assert_eq!(view["physical_interface"][0]["device"], json!(device.to_string()));
    }

    #[tokio::test]
    async fn test_missing_target_resolves_to_null() {
        let store = InMemoryStore::new();
        let (location, device, _) = seed(&store).await;
        store.delete(Collection::Locations, location).await.unwrap();

        let doc = store.get(Collection::Devices, device).await.unwrap().unwrap();
        let view = resolve(&store, Collection::Devices, doc, 2).await.unwrap();
        assert_eq!(view["location"], Value::Null);
    }
}
