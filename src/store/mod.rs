//! Document store adapter: the capability every resource collection is served through.

mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::{ensure_database_exists, PgDocumentStore};

use crate::config::Settings;
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Connection string that selects the in-process store.
pub const MEMORY_URL_SCHEME: &str = "memory://";

/// Operations over named collections of JSON documents.
///
/// `id` parameters are values of the documents' own `id` field, never the
/// store's internal key. When several documents share an id the first one
/// inserted wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create the collection's backing storage if missing.
    async fn ensure_collection(&self, collection: &str) -> Result<(), AppError>;

    async fn find_all(&self, collection: &str) -> Result<Vec<Value>, AppError>;

    async fn find_one_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Option<Value>, AppError>;

    /// Insert and return the stored document.
    async fn insert(&self, collection: &str, document: Value) -> Result<Value, AppError>;

    /// Replace the document with this id. None when no document matches.
    async fn update_by_id(
        &self,
        collection: &str,
        id: &Value,
        document: Value,
    ) -> Result<Option<Value>, AppError>;

    /// Returns whether a document was removed.
    async fn delete_by_id(&self, collection: &str, id: &Value) -> Result<bool, AppError>;

    async fn ping(&self) -> Result<(), AppError>;

    async fn close(&self);
}

/// Open the store named by `settings.database_url`. Failure here is fatal at startup.
pub async fn connect(settings: &Settings) -> Result<Arc<dyn DocumentStore>, AppError> {
    if settings.database_url.starts_with(MEMORY_URL_SCHEME) {
        tracing::info!("using in-memory document store");
        return Ok(Arc::new(MemoryDocumentStore::new()));
    }
    ensure_database_exists(&settings.database_url).await?;
    let store = PgDocumentStore::connect(settings).await?;
    Ok(Arc::new(store))
}

/// Create backing storage for every collection.
pub async fn ensure_collections<'a>(
    store: &dyn DocumentStore,
    collections: impl IntoIterator<Item = &'a str>,
) -> Result<(), AppError> {
    for collection in collections {
        store.ensure_collection(collection).await?;
    }
    Ok(())
}
