//! Schema declaration types shared by resource records and the registry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of the application-assigned `id` field. Drives how path ids are parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdKind {
    Number,
    Text,
}

impl IdKind {
    /// Parse a path segment into the JSON value stored in the `id` field.
    /// Returns None when the segment cannot be an id of this kind.
    pub fn parse(&self, raw: &str) -> Option<serde_json::Value> {
        match self {
            IdKind::Number => raw.parse::<i64>().ok().map(|n| serde_json::Value::Number(n.into())),
            IdKind::Text => Some(serde_json::Value::String(raw.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Number,
    Text,
    Bool,
    Timestamp,
    /// List of sub-documents or scalars.
    List,
    /// Untyped JSON.
    Any,
}

/// One declared field of a resource document.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Whether a value is filled in when the field is omitted on create.
    pub has_default: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        FieldSpec {
            name,
            kind,
            required: true,
            has_default: false,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        FieldSpec {
            name,
            kind,
            required: false,
            has_default: false,
        }
    }

    pub const fn defaulted(name: &'static str, kind: FieldKind) -> Self {
        FieldSpec {
            name,
            kind,
            required: false,
            has_default: true,
        }
    }
}

/// String formats a rule can demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Email,
    /// Absolute `http://` or `https://` URL.
    Url,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

impl ValidationRule {
    pub fn email() -> Self {
        ValidationRule {
            format: Some(Format::Email),
            ..Default::default()
        }
    }

    pub fn non_negative() -> Self {
        ValidationRule {
            minimum: Some(0.0),
            ..Default::default()
        }
    }
}

/// Rules file layout: path segment -> field -> rule.
pub type RulesFile = HashMap<String, HashMap<String, ValidationRule>>;
