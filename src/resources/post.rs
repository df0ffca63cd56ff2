use super::{lenient, Resource};
use crate::config::{FieldKind, FieldSpec, IdKind, ValidationRule};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::number")]
    pub user_id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_img: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub post: String,
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub like_count: i64,
    /// Free-form comment entries; the `comments` collection is separate.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub comments: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Resource for Post {
    const NAME: &'static str = "Post";
    const PATH: &'static str = "posts";
    const ID_KIND: IdKind = IdKind::Text;

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("id", FieldKind::Text),
            FieldSpec::required("userId", FieldKind::Number),
            FieldSpec::required("email", FieldKind::Text),
            FieldSpec::required("username", FieldKind::Text),
            FieldSpec::optional("userImg", FieldKind::Text),
            FieldSpec::required("post", FieldKind::Text),
            FieldSpec::defaulted("likeCount", FieldKind::Number),
            FieldSpec::defaulted("comments", FieldKind::List),
            FieldSpec::optional("description", FieldKind::Text),
        ];
        FIELDS
    }

    fn default_rules() -> HashMap<String, ValidationRule> {
        HashMap::from([("likeCount".to_string(), ValidationRule::non_negative())])
    }
}
