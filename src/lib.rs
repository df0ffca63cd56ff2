//! Social API: document-backed REST backend for accounts, users, posts, comments,
//! messages, live sessions, and reels.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod realtime;
pub mod resources;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{load_registry, SchemaRegistry, Settings};
pub use error::{AppError, ConfigError};
pub use realtime::RealtimeHub;
pub use routes::{api_routes, app, common_routes, resource_routes};
pub use service::CrudService;
pub use state::AppState;
pub use store::{connect, ensure_collections, DocumentStore, MemoryDocumentStore, PgDocumentStore};
