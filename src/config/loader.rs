//! Build the runtime registry: built-in resources plus an optional rules file.

use crate::config::{validate, validate_rules, RulesFile, SchemaRegistry};
use crate::error::ConfigError;
use std::path::Path;

/// Built-in registry with rules from `rules_path` merged in (call once at startup).
pub async fn load_registry(rules_path: Option<&Path>) -> Result<SchemaRegistry, ConfigError> {
    let mut registry = SchemaRegistry::builtin();
    if let Some(path) = rules_path {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
        let rules = parse_rules(&raw)?;
        apply_rules(&mut registry, rules)?;
        tracing::info!(path = %path.display(), "loaded validation rules");
    }
    validate(&registry)?;
    Ok(registry)
}

pub fn parse_rules(raw: &str) -> Result<RulesFile, ConfigError> {
    serde_json::from_str(raw).map_err(|e| ConfigError::Load(format!("rules file: {}", e)))
}

/// Merge rules into the registry. A rule replaces any built-in rule for the same field.
pub fn apply_rules(registry: &mut SchemaRegistry, rules: RulesFile) -> Result<(), ConfigError> {
    validate_rules(registry, &rules)?;
    for (path, fields) in rules {
        let descriptor = registry
            .by_path_mut(&path)
            .ok_or_else(|| ConfigError::UnknownResource(path.clone()))?;
        for (field, rule) in fields {
            descriptor.validation.insert(field, rule);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn loads_without_rules_file() {
        let registry = load_registry(None).await.unwrap();
        assert_eq!(registry.resources.len(), 7);
    }

    #[tokio::test]
    async fn merges_rules_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "accounts": {{ "username": {{ "max_length": 12, "pattern": "^[a-z0-9_]+$" }} }} }}"#
        )
        .unwrap();
        let registry = load_registry(Some(file.path())).await.unwrap();
        let rule = &registry.rules("accounts")["username"];
        assert_eq!(rule.max_length, Some(12));
        // built-in rules elsewhere are untouched
        assert!(registry.rules("users").contains_key("email"));
    }

    #[tokio::test]
    async fn missing_file_is_a_load_error() {
        let err = load_registry(Some(Path::new("/nonexistent/rules.json"))).await.unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn malformed_rules_are_a_load_error() {
        assert!(matches!(parse_rules("{ not json"), Err(ConfigError::Load(_))));
    }
}
