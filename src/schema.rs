//! Schema System - Descriptors and Registry
//!
//! A descriptor names a tag and whitelists its attributes and child tags.
//! The registry maps semantic names to factories built from descriptors.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use crate::docx::ElementKind;
use crate::element::ElementFactory;
use crate::error::{DocxError, Result};

/// Immutable rule set for one element kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescriptor {
    pub tag_name: String,
    #[serde(default)]
    pub valid_attributes: BTreeSet<String>,
    #[serde(default)]
    pub valid_children: BTreeSet<String>,
}

impl SchemaDescriptor {
    /// Descriptor with no permitted attributes or children
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Self::default()
        }
    }

    pub fn with_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_attributes.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_children<I, S>(mut self, tag_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_children.extend(tag_names.into_iter().map(Into::into));
        self
    }

    pub fn allows_attribute(&self, name: &str) -> bool {
        self.valid_attributes.contains(name)
    }

    pub fn allows_child(&self, tag_name: &str) -> bool {
        self.valid_children.contains(tag_name)
    }
}

/// On-disk form: a descriptor plus the semantic name it registers under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFile {
    pub name: String,
    #[serde(flatten)]
    pub descriptor: SchemaDescriptor,
}

/// Schema registry - semantic name to element factory
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    factories: HashMap<String, ElementFactory>,
}

impl SchemaRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry preloaded with the WordprocessingML catalogue
    pub fn builtin() -> Self {
        let factories = ElementKind::ALL
            .iter()
            .map(|kind| (kind.name().to_string(), kind.factory().clone()))
            .collect();
        Self { factories }
    }

    /// Register every `*.json` schema file in `dir`, returning how many were added.
    ///
    /// Files are registered in file name order, so a later file wins when two
    /// share a semantic name. Files that cannot be read, do not parse, or carry
    /// an empty tag name are skipped with a warning. A missing directory
    /// registers nothing.
    pub fn load_from_dir(&mut self, dir: &Path) -> Result<usize> {
        if !dir.exists() {
            tracing::debug!(dir = %dir.display(), "Schema directory not found, nothing loaded");
            return Ok(0);
        }

        let mut paths = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        paths.retain(|path| path.extension().is_some_and(|e| e == "json"));
        // Later files override earlier ones under the same name
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable schema file");
                    continue;
                }
            };
            let file = match serde_json::from_str::<SchemaFile>(&content) {
                Ok(file) => file,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unparseable schema file");
                    continue;
                }
            };

            match self.register(&file.name, file.descriptor) {
                Ok(()) => loaded += 1,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping invalid schema file");
                }
            }
        }

        tracing::debug!(dir = %dir.display(), loaded, "Loaded schema files");
        Ok(loaded)
    }

    /// Register a descriptor, replacing any previous one under the same name
    pub fn register(&mut self, name: &str, descriptor: SchemaDescriptor) -> Result<()> {
        let factory = ElementFactory::new(descriptor)?;
        if self.factories.insert(name.to_string(), factory).is_some() {
            tracing::debug!(name, "Replaced schema");
        } else {
            tracing::debug!(name, "Registered schema");
        }
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&SchemaDescriptor> {
        self.factories.get(name).map(ElementFactory::descriptor)
    }

    pub fn factory(&self, name: &str) -> Result<&ElementFactory> {
        self.factories
            .get(name)
            .ok_or_else(|| DocxError::UnknownElement(name.to_string()))
    }

    /// All entries, sorted by semantic name
    pub fn list(&self) -> Vec<(&str, &SchemaDescriptor)> {
        let mut entries: Vec<_> = self
            .factories
            .iter()
            .map(|(name, factory)| (name.as_str(), factory.descriptor()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Markup;

    #[test]
    fn test_descriptor_defaults_from_json() {
        let descriptor: SchemaDescriptor = serde_json::from_str(r#"{"tagName": "w:br"}"#).unwrap();
        assert_eq!(descriptor, SchemaDescriptor::new("w:br"));
        assert!(!descriptor.allows_attribute("w:type"));
        assert!(!descriptor.allows_child("w:t"));
    }

    #[test]
    fn test_builtin_lookup() {
        let registry = SchemaRegistry::builtin();
        let p = registry.lookup("p").unwrap();
        assert_eq!(p.tag_name, "w:p");
        assert!(p.allows_child("w:r"));
        assert!(p.allows_child("w:pPr"));
        assert!(registry.lookup("table").is_none());
    }

    #[test]
    fn test_factory_unknown_element() {
        let registry = SchemaRegistry::builtin();
        let err = registry.factory("table").unwrap_err();
        assert!(matches!(err, DocxError::UnknownElement(name) if name == "table"));
    }

    #[test]
    fn test_register_rejects_empty_tag() {
        let mut registry = SchemaRegistry::new();
        let result = registry.register("broken", SchemaDescriptor::new(""));
        assert!(matches!(result, Err(DocxError::EmptyTagName)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = SchemaRegistry::builtin();
        let before = registry.len();
        registry
            .register("b", SchemaDescriptor::new("w:b").with_attributes(["w:val"]))
            .unwrap();
        assert_eq!(registry.len(), before);

        let b = registry.factory("b").unwrap().create().with_attr("w:val", 0).unwrap();
        assert_eq!(b.render(), r#"<w:b w:val="0"/>"#);
    }

    #[test]
    fn test_list_sorted() {
        let registry = SchemaRegistry::builtin();
        let names: Vec<_> = registry.list().into_iter().map(|(name, _)| name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), ElementKind::ALL.len());
    }
}
