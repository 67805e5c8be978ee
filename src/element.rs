//! Element Engine - Schema-Checked Markup Nodes
//!
//! A factory is bound to exactly one descriptor. Every element it produces
//! is valid when created and stays valid through every mutation: a rejected
//! attribute or child leaves the element untouched.
//!
//! Rendering never escapes. Attribute values and text are embedded as given.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use crate::error::{DocxError, Result};
use crate::schema::SchemaDescriptor;

/// Ordered attribute map. Render order is insertion order.
pub type Attributes = IndexMap<String, String>;

/// Raised when an attribute or child is outside a descriptor whitelist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("invalid attribute {name}")]
    InvalidAttribute { tag: String, name: String },

    #[error("invalid child {child}")]
    InvalidChild { tag: String, child: String },
}

impl SchemaViolation {
    /// Tag name of the element that rejected the attribute or child
    pub fn tag(&self) -> &str {
        match self {
            Self::InvalidAttribute { tag, .. } | Self::InvalidChild { tag, .. } => tag,
        }
    }
}

/// Node interface the engine works against.
///
/// Children are stored behind this trait, so the engine never needs to know
/// which concrete kind of node it holds.
pub trait Markup: fmt::Debug + Send + Sync {
    fn tag_name(&self) -> &str;

    /// Append this node's markup to `out`
    fn write_markup(&self, out: &mut String);

    fn render(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }
}

impl<M: Markup + ?Sized> Markup for Box<M> {
    fn tag_name(&self) -> &str {
        (**self).tag_name()
    }

    fn write_markup(&self, out: &mut String) {
        (**self).write_markup(out)
    }
}

/// Produces elements bound to one descriptor.
///
/// Cloning is cheap; clones share the same read-only descriptor.
#[derive(Debug, Clone)]
pub struct ElementFactory {
    descriptor: Arc<SchemaDescriptor>,
}

impl ElementFactory {
    pub fn new(descriptor: SchemaDescriptor) -> Result<Self> {
        if descriptor.tag_name.is_empty() {
            return Err(DocxError::EmptyTagName);
        }
        Ok(Self::from_trusted(descriptor))
    }

    /// Skips the tag name check. Only for the built-in catalogue.
    pub(crate) fn from_trusted(descriptor: SchemaDescriptor) -> Self {
        debug_assert!(!descriptor.tag_name.is_empty());
        Self {
            descriptor: Arc::new(descriptor),
        }
    }

    pub fn descriptor(&self) -> &SchemaDescriptor {
        &self.descriptor
    }

    pub fn tag_name(&self) -> &str {
        &self.descriptor.tag_name
    }

    /// Create an empty element: no text, no attributes, no children
    pub fn create(&self) -> Element {
        Element {
            descriptor: Arc::clone(&self.descriptor),
            text: None,
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Create an element with initial state.
    ///
    /// All attributes are checked first, then all children. The first
    /// offender is reported and no element is produced. Empty text counts
    /// as no text.
    pub fn build<K, V, I, M>(
        &self,
        text: Option<&str>,
        attributes: impl IntoIterator<Item = (K, V)>,
        children: I,
    ) -> std::result::Result<Element, SchemaViolation>
    where
        K: Into<String>,
        V: ToString,
        I: IntoIterator<Item = M>,
        M: Markup + 'static,
    {
        let attributes: Attributes = attributes
            .into_iter()
            .map(|(name, value)| (name.into(), value.to_string()))
            .collect();

        if let Some(name) = attributes
            .keys()
            .find(|name| !self.descriptor.allows_attribute(name))
        {
            return Err(SchemaViolation::InvalidAttribute {
                tag: self.descriptor.tag_name.clone(),
                name: name.clone(),
            });
        }

        let children: Vec<Box<dyn Markup>> = children
            .into_iter()
            .map(|child| Box::new(child) as Box<dyn Markup>)
            .collect();

        if let Some(child) = children
            .iter()
            .find(|child| !self.descriptor.allows_child(child.tag_name()))
        {
            return Err(SchemaViolation::InvalidChild {
                tag: self.descriptor.tag_name.clone(),
                child: child.tag_name().to_string(),
            });
        }

        Ok(Element {
            descriptor: Arc::clone(&self.descriptor),
            text: text.filter(|t| !t.is_empty()).map(str::to_string),
            attributes,
            children,
        })
    }
}

/// A mutable node constrained by its descriptor.
#[derive(Debug)]
pub struct Element {
    descriptor: Arc<SchemaDescriptor>,
    text: Option<String>,
    attributes: Attributes,
    children: Vec<Box<dyn Markup>>,
}

impl Element {
    pub fn descriptor(&self) -> &SchemaDescriptor {
        &self.descriptor
    }

    /// Child at `index`, or `None` when out of range.
    ///
    /// Children are held as `Markup`, so only the tag name and rendered
    /// markup are reachable here. Set a child's text and attributes before
    /// appending it.
    pub fn get_child(&self, index: usize) -> Option<&dyn Markup> {
        self.children.get(index).map(|child| child.as_ref())
    }

    pub fn children(&self) -> impl Iterator<Item = &dyn Markup> + '_ {
        self.children.iter().map(|child| child.as_ref())
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Append a child at the end. A rejected child leaves the children as they were.
    pub fn append<M: Markup + 'static>(
        &mut self,
        child: M,
    ) -> std::result::Result<&mut Self, SchemaViolation> {
        if !self.descriptor.allows_child(child.tag_name()) {
            tracing::debug!(tag = %self.descriptor.tag_name, child = %child.tag_name(), "Rejected child");
            return Err(SchemaViolation::InvalidChild {
                tag: self.descriptor.tag_name.clone(),
                child: child.tag_name().to_string(),
            });
        }
        self.children.push(Box::new(child));
        Ok(self)
    }

    /// Append children in order.
    ///
    /// Not atomic: children appended before a rejected one stay appended.
    pub fn append_all<I, M>(&mut self, children: I) -> std::result::Result<&mut Self, SchemaViolation>
    where
        I: IntoIterator<Item = M>,
        M: Markup + 'static,
    {
        for child in children {
            self.append(child)?;
        }
        Ok(self)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replace the text. An empty string is kept but renders as no text.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    pub fn clear_text(&mut self) -> &mut Self {
        self.text = None;
        self
    }

    /// Current value of `name`. Reads are not checked against the whitelist.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set or overwrite an attribute. An overwritten attribute keeps its position.
    pub fn set_attr(
        &mut self,
        name: &str,
        value: impl ToString,
    ) -> std::result::Result<&mut Self, SchemaViolation> {
        if !self.descriptor.allows_attribute(name) {
            tracing::debug!(tag = %self.descriptor.tag_name, attribute = %name, "Rejected attribute");
            return Err(SchemaViolation::InvalidAttribute {
                tag: self.descriptor.tag_name.clone(),
                name: name.to_string(),
            });
        }
        self.attributes.insert(name.to_string(), value.to_string());
        Ok(self)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    // Owned variants for building trees in a single expression.

    pub fn with_child<M: Markup + 'static>(mut self, child: M) -> std::result::Result<Self, SchemaViolation> {
        self.append(child)?;
        Ok(self)
    }

    pub fn with_attr(mut self, name: &str, value: impl ToString) -> std::result::Result<Self, SchemaViolation> {
        self.set_attr(name, value)?;
        Ok(self)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    fn has_content(&self) -> bool {
        !self.children.is_empty() || self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl Markup for Element {
    fn tag_name(&self) -> &str {
        &self.descriptor.tag_name
    }

    fn write_markup(&self, out: &mut String) {
        let tag = &self.descriptor.tag_name;

        out.push('<');
        out.push_str(tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }

        if !self.has_content() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            child.write_markup(out);
        }
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
