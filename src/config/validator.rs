//! Registry validation: path uniqueness, id declarations, and rule references.

use crate::config::{RulesFile, SchemaRegistry, ValidationRule};
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;

pub fn validate(registry: &SchemaRegistry) -> Result<(), ConfigError> {
    let mut path_segments = HashSet::new();
    for d in &registry.resources {
        if !path_segments.insert(d.path_segment) {
            return Err(ConfigError::DuplicatePathSegment(d.path_segment.to_string()));
        }
        match d.field("id") {
            Some(f) if f.required => {}
            _ => {
                return Err(ConfigError::Validation(format!(
                    "{} must declare a required id field",
                    d.name
                )))
            }
        }
        for (field, rule) in &d.validation {
            if d.field(field).is_none() {
                return Err(ConfigError::UnknownField {
                    resource: d.path_segment.to_string(),
                    field: field.clone(),
                });
            }
            validate_rule(d.path_segment, field, rule)?;
        }
    }
    Ok(())
}

/// Check a rules file against the registry before it is merged.
pub fn validate_rules(registry: &SchemaRegistry, rules: &RulesFile) -> Result<(), ConfigError> {
    for (path, fields) in rules {
        let d = registry
            .by_path(path)
            .ok_or_else(|| ConfigError::UnknownResource(path.clone()))?;
        for (field, rule) in fields {
            if d.field(field).is_none() {
                return Err(ConfigError::UnknownField {
                    resource: path.clone(),
                    field: field.clone(),
                });
            }
            validate_rule(path, field, rule)?;
        }
    }
    Ok(())
}

fn validate_rule(resource: &str, field: &str, rule: &ValidationRule) -> Result<(), ConfigError> {
    if let Some(pattern) = &rule.pattern {
        Regex::new(pattern).map_err(|e| {
            ConfigError::Validation(format!("{}.{}: invalid pattern: {}", resource, field, e))
        })?;
    }
    if let (Some(min), Some(max)) = (rule.min_length, rule.max_length) {
        if min > max {
            return Err(ConfigError::Validation(format!(
                "{}.{}: min_length {} exceeds max_length {}",
                resource, field, min, max
            )));
        }
    }
    if let (Some(min), Some(max)) = (rule.minimum, rule.maximum) {
        if min > max {
            return Err(ConfigError::Validation(format!(
                "{}.{}: minimum {} exceeds maximum {}",
                resource, field, min, max
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResourceDescriptor;
    use crate::resources::Account;
    use std::collections::HashMap;

    #[test]
    fn builtin_registry_is_valid() {
        validate(&SchemaRegistry::builtin()).unwrap();
    }

    #[test]
    fn duplicate_path_is_rejected() {
        let mut registry = SchemaRegistry::builtin();
        registry.push(ResourceDescriptor::of::<Account>());
        assert!(matches!(validate(&registry), Err(ConfigError::DuplicatePathSegment(p)) if p == "accounts"));
    }

    #[test]
    fn rules_for_unknown_field_are_rejected() {
        let registry = SchemaRegistry::builtin();
        let rules: RulesFile = HashMap::from([(
            "accounts".to_string(),
            HashMap::from([("nickname".to_string(), ValidationRule::default())]),
        )]);
        assert!(matches!(
            validate_rules(&registry, &rules),
            Err(ConfigError::UnknownField { .. })
        ));
    }

    #[test]
    fn rules_for_unknown_resource_are_rejected() {
        let registry = SchemaRegistry::builtin();
        let rules: RulesFile = HashMap::from([("stories".to_string(), HashMap::new())]);
        assert!(matches!(
            validate_rules(&registry, &rules),
            Err(ConfigError::UnknownResource(p)) if p == "stories"
        ));
    }

    #[test]
    fn broken_pattern_is_rejected() {
        let registry = SchemaRegistry::builtin();
        let rule = ValidationRule {
            pattern: Some("([a-z".into()),
            ..Default::default()
        };
        let rules: RulesFile = HashMap::from([(
            "accounts".to_string(),
            HashMap::from([("username".to_string(), rule)]),
        )]);
        assert!(matches!(validate_rules(&registry, &rules), Err(ConfigError::Validation(_))));
    }
}
