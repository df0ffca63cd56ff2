use super::{lenient, now, Resource};
use crate::config::{FieldKind, FieldSpec, IdKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direct message between two users. Sender and receiver are user ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub sender_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub receiver_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub seen: bool,
    #[serde(default = "now", deserialize_with = "lenient::or_now")]
    pub created_at: DateTime<Utc>,
}

impl Resource for Message {
    const NAME: &'static str = "Message";
    const PATH: &'static str = "messages";
    const ID_KIND: IdKind = IdKind::Text;

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("id", FieldKind::Text),
            FieldSpec::required("senderId", FieldKind::Text),
            FieldSpec::required("receiverId", FieldKind::Text),
            FieldSpec::required("text", FieldKind::Text),
            FieldSpec::optional("image", FieldKind::Text),
            FieldSpec::defaulted("seen", FieldKind::Bool),
            FieldSpec::defaulted("createdAt", FieldKind::Timestamp),
        ];
        FIELDS
    }
}
