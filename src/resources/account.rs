use super::{lenient, Resource};
use crate::config::{FieldKind, FieldSpec, IdKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(deserialize_with = "lenient::number")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub username: String,
}

impl Resource for Account {
    const NAME: &'static str = "Account";
    const PATH: &'static str = "accounts";
    const ID_KIND: IdKind = IdKind::Number;

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("id", FieldKind::Number),
            FieldSpec::required("name", FieldKind::Text),
            FieldSpec::required("username", FieldKind::Text),
        ];
        FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_username_is_rejected() {
        let err = serde_json::from_value::<Account>(json!({ "id": 1, "name": "A" })).unwrap_err();
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let res = serde_json::from_value::<Account>(json!({ "id": "one", "name": "A", "username": "a" }));
        assert!(res.is_err());
    }

    #[test]
    fn numeric_string_id_is_cast() {
        let account: Account =
            serde_json::from_value(json!({ "id": "3", "name": "A", "username": "a" })).unwrap();
        assert_eq!(account.id, 3);
    }
}
