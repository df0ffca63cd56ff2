use super::{lenient, now, Resource};
use crate::config::{FieldKind, FieldSpec, IdKind, ValidationRule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn active() -> bool {
    true
}

/// A live broadcast session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Live {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::number")]
    pub user_id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_img: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default = "active", deserialize_with = "lenient::or_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub viewers: i64,
    #[serde(default = "now", deserialize_with = "lenient::or_now")]
    pub started_at: DateTime<Utc>,
}

impl Resource for Live {
    const NAME: &'static str = "Live";
    const PATH: &'static str = "lives";
    const ID_KIND: IdKind = IdKind::Text;

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("id", FieldKind::Text),
            FieldSpec::required("userId", FieldKind::Number),
            FieldSpec::required("username", FieldKind::Text),
            FieldSpec::optional("userImg", FieldKind::Text),
            FieldSpec::required("title", FieldKind::Text),
            FieldSpec::defaulted("isActive", FieldKind::Bool),
            FieldSpec::defaulted("viewers", FieldKind::Number),
            FieldSpec::defaulted("startedAt", FieldKind::Timestamp),
        ];
        FIELDS
    }

    fn default_rules() -> HashMap<String, ValidationRule> {
        HashMap::from([("viewers".to_string(), ValidationRule::non_negative())])
    }
}
