//! docxml Core - Schema-Checked WordprocessingML Builder
//!
//! # Ground Rules
//! 1. Descriptors Are Contracts
//! 2. Invalid Trees Cannot Be Built
//! 3. Rendering Is Pure
//! 4. Callers Escape, Engine Embeds

pub mod docx;
pub mod element;
pub mod error;
pub mod hashing;
pub mod schema;
pub mod template;
pub mod tree;

pub use docx::ElementKind;
pub use element::{Attributes, Element, ElementFactory, Markup, SchemaViolation};
pub use error::{DocxError, Result};
pub use hashing::{canonical_json, markup_digest, registry_fingerprint};
pub use schema::{SchemaDescriptor, SchemaFile, SchemaRegistry};
pub use tree::ElementSpec;

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
