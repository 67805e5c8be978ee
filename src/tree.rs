//! Declarative element trees
//!
//! A JSON-friendly description of a subtree, materialized through a
//! registry so every node goes through its factory.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::element::Element;
use crate::error::Result;
use crate::schema::SchemaRegistry;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementSpec {
    /// Semantic registry name, e.g. `p` or `rPr`
    pub element: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, Value>,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    /// Build the subtree, children first.
    pub fn build(&self, registry: &SchemaRegistry) -> Result<Element> {
        let factory = registry.factory(&self.element)?;

        let children = self
            .children
            .iter()
            .map(|child| child.build(registry))
            .collect::<Result<Vec<_>>>()?;

        let attributes = self
            .attributes
            .iter()
            .map(|(name, value)| (name.as_str(), attribute_value(value)));

        Ok(factory.build(self.text.as_deref(), attributes, children)?)
    }
}

/// Strings are taken as-is, anything else in its JSON form
fn attribute_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
