use super::{lenient, Resource};
use crate::config::{FieldKind, FieldSpec, IdKind, ValidationRule};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Follow {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Entry of `current`: accounts signed in on this profile's device.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Story {
    #[serde(default, deserialize_with = "lenient::opt_number")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub follows: Vec<Follow>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub followers: Vec<Follow>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zametka: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub password: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub current: Vec<Session>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub stories: Vec<Story>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub like_items: Vec<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub saved: Vec<SavedItem>,
}

impl Resource for User {
    const NAME: &'static str = "User";
    const PATH: &'static str = "users";
    const ID_KIND: IdKind = IdKind::Text;

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("id", FieldKind::Text),
            FieldSpec::defaulted("follows", FieldKind::List),
            FieldSpec::defaulted("followers", FieldKind::List),
            FieldSpec::optional("nickName", FieldKind::Text),
            FieldSpec::required("email", FieldKind::Text),
            FieldSpec::optional("zametka", FieldKind::Text),
            FieldSpec::required("password", FieldKind::Text),
            FieldSpec::optional("description", FieldKind::Text),
            FieldSpec::optional("note", FieldKind::Text),
            FieldSpec::defaulted("current", FieldKind::List),
            FieldSpec::optional("avatar", FieldKind::Text),
            FieldSpec::defaulted("stories", FieldKind::List),
            FieldSpec::defaulted("likeItems", FieldKind::List),
            FieldSpec::defaulted("saved", FieldKind::List),
        ];
        FIELDS
    }

    fn default_rules() -> HashMap<String, ValidationRule> {
        HashMap::from([("email".to_string(), ValidationRule::email())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lists_default_to_empty() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "email": "u1@example.com",
            "password": "secret"
        }))
        .unwrap();
        assert!(user.follows.is_empty());
        assert!(user.like_items.is_empty());
        let out = serde_json::to_value(&user).unwrap();
        assert_eq!(out["likeItems"], json!([]));
        assert!(out.get("nickName").is_none());
    }

    #[test]
    fn nested_documents_keep_camel_case() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "email": "u1@example.com",
            "password": "secret",
            "saved": [{ "id": "p1", "userId": 7 }],
            "stories": [{ "id": 1, "text": "hi" }]
        }))
        .unwrap();
        assert_eq!(user.saved[0].user_id, Some(7));
        assert_eq!(user.stories[0].text.as_deref(), Some("hi"));
    }

    #[test]
    fn null_lists_and_scalar_ids_are_cast() {
        let user: User = serde_json::from_value(json!({
            "id": 42,
            "email": "u1@example.com",
            "password": "secret",
            "follows": null,
            "saved": [{ "id": 9, "userId": "7" }]
        }))
        .unwrap();
        assert_eq!(user.id, "42");
        assert!(user.follows.is_empty());
        assert_eq!(user.saved[0].id.as_deref(), Some("9"));
        assert_eq!(user.saved[0].user_id, Some(7));
    }
}
