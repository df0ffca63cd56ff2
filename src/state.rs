//! Shared application state for all routes. Built once at startup and cloned into handlers.

use crate::config::SchemaRegistry;
use crate::realtime::RealtimeHub;
use crate::store::DocumentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub registry: Arc<SchemaRegistry>,
    pub realtime: RealtimeHub,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, registry: SchemaRegistry) -> Self {
        AppState {
            store,
            registry: Arc::new(registry),
            realtime: RealtimeHub::new(),
        }
    }
}
