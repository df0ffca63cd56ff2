//! Typed resource records. Each record is the boundary validator for its collection:
//! required fields are non-optional, defaults are filled by serde, unknown fields are dropped.

mod account;
mod comment;
mod lenient;
mod live;
mod message;
mod post;
mod reel;
mod user;

pub use account::Account;
pub use comment::Comment;
pub use live::Live;
pub use message::Message;
pub use post::Post;
pub use reel::Reel;
pub use user::{Follow, SavedItem, Session, Story, User};

use crate::config::{FieldSpec, IdKind, ValidationRule};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

/// A document type served under its own path prefix and stored in its own collection.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Display name used in messages ("Account not found").
    const NAME: &'static str;
    /// Path prefix and collection name.
    const PATH: &'static str;
    const ID_KIND: IdKind;

    fn fields() -> &'static [FieldSpec];

    /// Built-in rules layered on top of the typed shape.
    fn default_rules() -> HashMap<String, ValidationRule> {
        HashMap::new()
    }
}

pub(crate) fn now() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now()
}
