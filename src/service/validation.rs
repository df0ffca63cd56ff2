//! Registry rules checked against the raw payload, ahead of typed decoding.
//!
//! Typed decoding already enforces presence and shape; rules add the constraints
//! a type cannot express (e-mail shape, lengths, bounds, patterns).

use crate::config::{Format, ValidationRule};
use crate::error::AppError;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

/// Rules of one resource, bound to its name for error messages.
pub struct RequestValidator<'a> {
    resource: &'static str,
    rules: &'a HashMap<String, ValidationRule>,
}

impl<'a> RequestValidator<'a> {
    pub fn new(resource: &'static str, rules: &'a HashMap<String, ValidationRule>) -> Self {
        RequestValidator { resource, rules }
    }

    /// Create payloads: every ruled field is checked; an absent field counts as null.
    pub fn check_all(&self, body: &HashMap<String, Value>) -> Result<(), AppError> {
        self.rules.iter().try_for_each(|(field, rule)| {
            self.check(field, body.get(field).unwrap_or(&Value::Null), rule)
        })
    }

    /// Update payloads: only the fields supplied are checked.
    pub fn check_supplied(&self, body: &HashMap<String, Value>) -> Result<(), AppError> {
        body.iter()
            .filter_map(|(field, value)| self.rules.get(field).map(|rule| (field, value, rule)))
            .try_for_each(|(field, value, rule)| self.check(field, value, rule))
    }

    fn check(&self, field: &str, value: &Value, rule: &ValidationRule) -> Result<(), AppError> {
        match violation(value, rule) {
            Some(reason) => Err(AppError::Validation(format!(
                "{}.{} {}",
                self.resource, field, reason
            ))),
            None => Ok(()),
        }
    }
}

/// First broken constraint of `rule`, if any. Null only breaks `required`.
fn violation(value: &Value, rule: &ValidationRule) -> Option<String> {
    if value.is_null() {
        return (rule.required == Some(true)).then(|| "is required".to_string());
    }

    if let Some(text) = value.as_str() {
        if let Some(format) = rule.format {
            if !matches_format(format, text) {
                return Some(match format {
                    Format::Email => "must be a valid email".to_string(),
                    Format::Url => "must be an http(s) URL".to_string(),
                });
            }
        }
        let len = text.chars().count();
        match (rule.min_length, rule.max_length) {
            (Some(min), _) if len < min as usize => {
                return Some(format!("must be at least {} characters", min))
            }
            (_, Some(max)) if len > max as usize => {
                return Some(format!("must be at most {} characters", max))
            }
            _ => {}
        }
        if let Some(pattern) = &rule.pattern {
            // patterns are checked at registry load; one that still fails to compile rejects
            let matched = Regex::new(pattern).map(|re| re.is_match(text)).unwrap_or(false);
            if !matched {
                return Some("does not match required pattern".to_string());
            }
        }
    }

    // numeric strings are cast to numbers on decode, so bounds apply to them too
    let number = value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()));
    if let Some(n) = number {
        match (rule.minimum, rule.maximum) {
            (Some(min), _) if n < min => return Some(format!("must be at least {}", min)),
            (_, Some(max)) if n > max => return Some(format!("must be at most {}", max)),
            _ => {}
        }
    }
    None
}

fn matches_format(format: Format, text: &str) -> bool {
    match format {
        Format::Email => text.split_once('@').map_or(false, |(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }),
        Format::Url => text.starts_with("http://") || text.starts_with("https://"),
    }
}
