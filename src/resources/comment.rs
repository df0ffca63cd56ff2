use super::{lenient, now, Resource};
use crate::config::{FieldKind, FieldSpec, IdKind, ValidationRule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub post_id: String,
    #[serde(deserialize_with = "lenient::number")]
    pub user_id: i64,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_img: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub like_count: i64,
    #[serde(default = "now", deserialize_with = "lenient::or_now")]
    pub created_at: DateTime<Utc>,
}

impl Resource for Comment {
    const NAME: &'static str = "Comment";
    const PATH: &'static str = "comments";
    const ID_KIND: IdKind = IdKind::Text;

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("id", FieldKind::Text),
            FieldSpec::required("postId", FieldKind::Text),
            FieldSpec::required("userId", FieldKind::Number),
            FieldSpec::optional("username", FieldKind::Text),
            FieldSpec::optional("userImg", FieldKind::Text),
            FieldSpec::required("text", FieldKind::Text),
            FieldSpec::defaulted("likeCount", FieldKind::Number),
            FieldSpec::defaulted("createdAt", FieldKind::Timestamp),
        ];
        FIELDS
    }

    fn default_rules() -> HashMap<String, ValidationRule> {
        HashMap::from([
            (
                "text".to_string(),
                ValidationRule {
                    min_length: Some(1),
                    ..Default::default()
                },
            ),
            ("likeCount".to_string(), ValidationRule::non_negative()),
        ])
    }
}
