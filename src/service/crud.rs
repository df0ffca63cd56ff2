//! Generic CRUD over one resource collection.
//!
//! Every lookup goes through the resource's declared `id` field. Writes are
//! validated twice: registry rules on the raw payload, then typed decoding
//! into the resource record, which enforces required fields and fills defaults.

use crate::config::ValidationRule;
use crate::error::AppError;
use crate::resources::Resource;
use crate::service::RequestValidator;
use crate::store::DocumentStore;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

pub struct CrudService<R> {
    store: Arc<dyn DocumentStore>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> CrudService<R> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        CrudService {
            store,
            _resource: PhantomData,
        }
    }

    /// All documents, unfiltered and unpaginated.
    pub async fn list(&self) -> Result<Vec<R>, AppError> {
        let docs = self.store.find_all(R::PATH).await?;
        docs.into_iter().map(decode_stored::<R>).collect()
    }

    /// Load by `id`, or NotFound. Ids that cannot be of this resource's id kind match nothing.
    pub async fn get(&self, id: &str) -> Result<R, AppError> {
        let (_, doc) = self.load(id).await?;
        decode_stored(doc)
    }

    pub async fn create(
        &self,
        body: Value,
        rules: &HashMap<String, ValidationRule>,
    ) -> Result<R, AppError> {
        let body = body_to_map(body)?;
        RequestValidator::new(R::NAME, rules).check_all(&body)?;
        let record: R = decode_payload(Value::Object(body.into_iter().collect()))?;
        let stored = self.store.insert(R::PATH, serde_json::to_value(&record)?).await?;
        tracing::info!(resource = R::NAME, "created");
        decode_stored(stored)
    }

    /// Read-modify-save: shallow-merge `patch` over the stored document and persist.
    /// An `id` in the patch merges like any other field, so the document moves to that id.
    pub async fn update(
        &self,
        id: &str,
        patch: Value,
        rules: &HashMap<String, ValidationRule>,
    ) -> Result<R, AppError> {
        let (id_value, existing) = self.load(id).await?;
        let patch = body_to_map(patch)?;
        RequestValidator::new(R::NAME, rules).check_supplied(&patch)?;

        let merged = shallow_merge(existing, patch.into_iter().collect());
        let record: R = decode_payload(merged)?;
        let stored = self
            .store
            .update_by_id(R::PATH, &id_value, serde_json::to_value(&record)?)
            .await?
            .ok_or_else(|| not_found::<R>())?;
        match stored.get("id").filter(|new_id| **new_id != id_value) {
            Some(new_id) => {
                tracing::info!(resource = R::NAME, id, new_id = %new_id, "updated, id changed")
            }
            None => tracing::info!(resource = R::NAME, id, "updated"),
        }
        decode_stored(stored)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let (id_value, _) = self.load(id).await?;
        if !self.store.delete_by_id(R::PATH, &id_value).await? {
            return Err(not_found::<R>());
        }
        tracing::info!(resource = R::NAME, id, "deleted");
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<(Value, Value), AppError> {
        let id_value = R::ID_KIND.parse(id).ok_or_else(|| not_found::<R>())?;
        let doc = self
            .store
            .find_one_by_field(R::PATH, "id", &id_value)
            .await?
            .ok_or_else(|| not_found::<R>())?;
        Ok((id_value, doc))
    }
}

/// Overwrite the top-level fields of `base` present in `patch`; nested values are replaced whole.
pub fn shallow_merge(base: Value, patch: Map<String, Value>) -> Value {
    let mut merged = match base {
        Value::Object(m) => m,
        _ => Map::new(),
    };
    for (k, v) in patch {
        merged.insert(k, v);
    }
    Value::Object(merged)
}

fn not_found<R: Resource>() -> AppError {
    AppError::NotFound(format!("{} not found", R::NAME))
}

fn body_to_map(value: Value) -> Result<HashMap<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m.into_iter().collect()),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

fn decode_payload<R: Resource>(value: Value) -> Result<R, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Validation(format!("{} validation failed: {}", R::NAME, e)))
}

/// Stored documents that no longer decode are a store fault, not a client error.
fn decode_stored<R: Resource>(value: Value) -> Result<R, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Store(format!("stored {} document is malformed: {}", R::NAME, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Account, Post, User};
    use crate::store::MemoryDocumentStore;
    use serde_json::json;

    fn service<R: Resource>(store: &Arc<MemoryDocumentStore>) -> CrudService<R> {
        CrudService::new(store.clone())
    }

    fn post_body(id: &str) -> Value {
        json!({
            "id": id,
            "userId": 1,
            "email": "a@b.c",
            "username": "a",
            "post": "https://img/1.png",
            "description": "first"
        })
    }

    #[test]
    fn merge_overwrites_only_supplied_fields() {
        let base = json!({ "a": 1, "b": { "x": 1 }, "c": [1] });
        let patch = json!({ "b": { "y": 2 }, "d": true });
        let merged = shallow_merge(base, patch.as_object().unwrap().clone());
        assert_eq!(merged, json!({ "a": 1, "b": { "y": 2 }, "c": [1], "d": true }));
    }

    #[tokio::test]
    async fn create_then_get_by_declared_id() {
        let store = Arc::new(MemoryDocumentStore::new());
        let accounts = service::<Account>(&store);
        let created = accounts
            .create(json!({ "id": 1, "name": "A", "username": "a" }), &HashMap::new())
            .await
            .unwrap();
        assert_eq!(created.username, "a");
        assert_eq!(accounts.get("1").await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_missing_required_field_leaves_collection_unchanged() {
        let store = Arc::new(MemoryDocumentStore::new());
        let accounts = service::<Account>(&store);
        let err = accounts
            .create(json!({ "id": 1, "name": "A" }), &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(accounts.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_object_body_is_bad_request() {
        let store = Arc::new(MemoryDocumentStore::new());
        let err = service::<Account>(&store)
            .create(json!([1, 2]), &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn unparseable_numeric_id_is_not_found() {
        let store = Arc::new(MemoryDocumentStore::new());
        let err = service::<Account>(&store).get("abc").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == "Account not found"));
    }

    #[tokio::test]
    async fn update_is_shallow() {
        let store = Arc::new(MemoryDocumentStore::new());
        let posts = service::<Post>(&store);
        posts.create(post_body("p1"), &HashMap::new()).await.unwrap();

        let updated = posts
            .update("p1", json!({ "likeCount": 5 }), &HashMap::new())
            .await
            .unwrap();
        assert_eq!(updated.id, "p1");
        assert_eq!(updated.like_count, 5);
        assert_eq!(updated.description.as_deref(), Some("first"));
        assert_eq!(posts.get("p1").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_with_new_id_moves_the_document() {
        let store = Arc::new(MemoryDocumentStore::new());
        let accounts = service::<Account>(&store);
        accounts
            .create(json!({ "id": 1, "name": "A", "username": "a" }), &HashMap::new())
            .await
            .unwrap();

        let moved = accounts.update("1", json!({ "id": 2 }), &HashMap::new()).await.unwrap();
        assert_eq!(moved.id, 2);
        assert_eq!(moved.username, "a");
        assert_eq!(accounts.get("2").await.unwrap(), moved);
        assert!(matches!(accounts.get("1").await, Err(AppError::NotFound(_))));
        assert_eq!(accounts.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_with_uncastable_id_is_rejected() {
        let store = Arc::new(MemoryDocumentStore::new());
        let accounts = service::<Account>(&store);
        accounts
            .create(json!({ "id": 1, "name": "A", "username": "a" }), &HashMap::new())
            .await
            .unwrap();
        let err = accounts.update("1", json!({ "id": "two" }), &HashMap::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(accounts.get("1").await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn update_that_breaks_the_schema_is_rejected() {
        let store = Arc::new(MemoryDocumentStore::new());
        let posts = service::<Post>(&store);
        posts.create(post_body("p1"), &HashMap::new()).await.unwrap();
        let err = posts
            .update("p1", json!({ "username": null }), &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(posts.get("p1").await.unwrap().username, "a");
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id_are_not_found() {
        let store = Arc::new(MemoryDocumentStore::new());
        let users = service::<User>(&store);
        assert!(matches!(
            users.update("u9", json!({ "note": "x" }), &HashMap::new()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(users.delete("u9").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn rules_apply_to_create_and_update() {
        let store = Arc::new(MemoryDocumentStore::new());
        let users = service::<User>(&store);
        let rules = User::default_rules();
        let err = users
            .create(json!({ "id": "u1", "email": "nope", "password": "pw" }), &rules)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        users
            .create(json!({ "id": "u1", "email": "u1@x.io", "password": "pw" }), &rules)
            .await
            .unwrap();
        assert!(users.update("u1", json!({ "email": "still-nope" }), &rules).await.is_err());
    }

    #[tokio::test]
    async fn malformed_stored_document_is_a_store_error() {
        let store = Arc::new(MemoryDocumentStore::new());
        store.insert("accounts", json!({ "id": 1 })).await.unwrap();
        let err = service::<Account>(&store).list().await.unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
    }
}
