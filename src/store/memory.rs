//! In-process document store. Same contract as the PostgreSQL adapter; nothing is persisted.

use super::DocumentStore;
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryDocumentStore {
    /// Collection name -> documents in insertion order.
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> AppError {
        AppError::Store("memory store lock poisoned".into())
    }
}

fn field_matches(doc: &Value, field: &str, value: &Value) -> bool {
    doc.get(field).map_or(false, |v| v == value)
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn ensure_collection(&self, collection: &str) -> Result<(), AppError> {
        let mut guard = self.collections.write().map_err(|_| Self::poisoned())?;
        guard.entry(collection.to_string()).or_default();
        Ok(())
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Value>, AppError> {
        let guard = self.collections.read().map_err(|_| Self::poisoned())?;
        Ok(guard.get(collection).cloned().unwrap_or_default())
    }

    async fn find_one_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Option<Value>, AppError> {
        let guard = self.collections.read().map_err(|_| Self::poisoned())?;
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| field_matches(d, field, value)))
            .cloned())
    }

    async fn insert(&self, collection: &str, document: Value) -> Result<Value, AppError> {
        if !document.is_object() {
            return Err(AppError::Store("document must be a JSON object".into()));
        }
        let mut guard = self.collections.write().map_err(|_| Self::poisoned())?;
        guard.entry(collection.to_string()).or_default().push(document.clone());
        Ok(document)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &Value,
        document: Value,
    ) -> Result<Option<Value>, AppError> {
        let mut guard = self.collections.write().map_err(|_| Self::poisoned())?;
        let slot = guard
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| field_matches(d, "id", id)));
        Ok(slot.map(|doc| {
            *doc = document;
            doc.clone()
        }))
    }

    async fn delete_by_id(&self, collection: &str, id: &Value) -> Result<bool, AppError> {
        let mut guard = self.collections.write().map_err(|_| Self::poisoned())?;
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(false);
        };
        match docs.iter().position(|d| field_matches(d, "id", id)) {
            Some(i) => {
                docs.remove(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn lookups_return_first_match_in_insertion_order() {
        let store = MemoryDocumentStore::new();
        store.insert("posts", json!({ "id": "p1", "post": "first" })).await.unwrap();
        store.insert("posts", json!({ "id": "p1", "post": "second" })).await.unwrap();
        let found = store.find_one_by_field("posts", "id", &json!("p1")).await.unwrap().unwrap();
        assert_eq!(found["post"], "first");
    }

    #[tokio::test]
    async fn id_match_is_type_sensitive() {
        let store = MemoryDocumentStore::new();
        store.insert("accounts", json!({ "id": 1 })).await.unwrap();
        assert!(store.find_one_by_field("accounts", "id", &json!("1")).await.unwrap().is_none());
        assert!(store.find_one_by_field("accounts", "id", &json!(1)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_ids() {
        let store = MemoryDocumentStore::new();
        assert!(store.update_by_id("users", &json!("u1"), json!({ "id": "u1" })).await.unwrap().is_none());
        assert!(!store.delete_by_id("users", &json!("u1")).await.unwrap());

        store.insert("users", json!({ "id": "u1", "note": "a" })).await.unwrap();
        let updated = store
            .update_by_id("users", &json!("u1"), json!({ "id": "u1", "note": "b" }))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated["note"], "b");
        assert!(store.delete_by_id("users", &json!("u1")).await.unwrap());
        assert!(store.find_all("users").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        store.insert("reels", json!({ "id": "r1" })).await.unwrap();
        assert!(store.find_all("lives").await.unwrap().is_empty());
        assert_eq!(store.find_all("reels").await.unwrap().len(), 1);
    }
}
