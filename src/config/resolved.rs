//! Resource schema registry: per-resource descriptors flattened for runtime use.

use crate::config::{FieldSpec, IdKind, ValidationRule};
use crate::resources::{Account, Comment, Live, Message, Post, Reel, Resource, User};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, Serialize)]
pub struct ResourceDescriptor {
    pub name: &'static str,
    pub path_segment: &'static str,
    /// Store collection backing this resource.
    pub collection: &'static str,
    pub id_kind: IdKind,
    pub fields: Vec<FieldSpec>,
    pub validation: HashMap<String, ValidationRule>,
}

impl ResourceDescriptor {
    pub fn of<R: Resource>() -> Self {
        ResourceDescriptor {
            name: R::NAME,
            path_segment: R::PATH,
            collection: R::PATH,
            id_kind: R::ID_KIND,
            fields: R::fields().to_vec(),
            validation: R::default_rules(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    pub resources: Vec<ResourceDescriptor>,
    by_path: HashMap<String, usize>,
    empty_rules: HashMap<String, ValidationRule>,
}

impl SchemaRegistry {
    /// Registry of every resource this service exposes.
    pub fn builtin() -> Self {
        let mut registry = SchemaRegistry::default();
        registry.register::<Account>();
        registry.register::<User>();
        registry.register::<Post>();
        registry.register::<Comment>();
        registry.register::<Message>();
        registry.register::<Live>();
        registry.register::<Reel>();
        registry
    }

    pub fn register<R: Resource>(&mut self) {
        self.push(ResourceDescriptor::of::<R>());
    }

    pub(crate) fn push(&mut self, descriptor: ResourceDescriptor) {
        self.by_path.insert(descriptor.path_segment.to_string(), self.resources.len());
        self.resources.push(descriptor);
    }

    pub fn by_path(&self, path: &str) -> Option<&ResourceDescriptor> {
        self.by_path.get(path).map(|&i| &self.resources[i])
    }

    pub(crate) fn by_path_mut(&mut self, path: &str) -> Option<&mut ResourceDescriptor> {
        match self.by_path.get(path) {
            Some(&i) => self.resources.get_mut(i),
            None => None,
        }
    }

    /// Extra validation rules for a resource; empty when none are declared.
    pub fn rules(&self, path: &str) -> &HashMap<String, ValidationRule> {
        self.by_path(path).map(|d| &d.validation).unwrap_or(&self.empty_rules)
    }

    pub fn collections(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.iter().map(|d| d.collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registers_all_resources() {
        let registry = SchemaRegistry::builtin();
        let paths: Vec<_> = registry.resources.iter().map(|d| d.path_segment).collect();
        assert_eq!(paths, vec!["accounts", "users", "posts", "comments", "messages", "lives", "reels"]);
        assert_eq!(registry.by_path("accounts").unwrap().id_kind, IdKind::Number);
        assert_eq!(registry.by_path("users").unwrap().id_kind, IdKind::Text);
    }

    #[test]
    fn rules_fall_back_to_empty() {
        let registry = SchemaRegistry::builtin();
        assert!(registry.rules("accounts").is_empty());
        assert!(registry.rules("users").contains_key("email"));
        assert!(registry.rules("nope").is_empty());
    }
}
