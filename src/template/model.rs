//! Serde model for authored document templates.
//!
//! The wire format is the engine's template JSON: a `schemas` array holding
//! one field mapping per page, plus top-level attributes (`basePdf`, fonts)
//! this subsystem treats as opaque and carries through untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::template::fields::FieldMap;

/// Field type discriminator, carried on the wire as a plain string.
///
/// Unknown type strings round-trip losslessly through [`FieldType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    MultiVariableText,
    Image,
    Other(String),
}

impl FieldType {
    /// Types whose content participates in field synchronization.
    pub fn is_syncable(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::MultiVariableText)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::MultiVariableText => "multiVariableText",
            FieldType::Image => "image",
            FieldType::Other(raw) => raw,
        }
    }
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "text" => FieldType::Text,
            "multiVariableText" => FieldType::MultiVariableText,
            "image" => FieldType::Image,
            _ => FieldType::Other(raw),
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Other(raw) => raw,
            other => other.as_str().to_owned(),
        }
    }
}

/// A named placeholder: type, synchronizable content, and opaque layout
/// attributes (position, size, fonts) owned by the rendering engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl FieldDefinition {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            content: None,
            attributes: Map::new(),
        }
    }

    pub fn with_content(field_type: FieldType, content: impl Into<String>) -> Self {
        Self {
            field_type,
            content: Some(content.into()),
            attributes: Map::new(),
        }
    }

    /// Content as seen by detection: absent content reads as empty.
    pub fn content_or_empty(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// One page's mapping of field name to field definition.
pub type Page = FieldMap;

/// Full multi-page template consumed by the rendering engine.
///
/// Pages are `Arc`-shared so candidate building copies only the page it
/// touches; unknown top-level attributes ride along opaquely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "schemas")]
    pub pages: Vec<Arc<Page>>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Template {
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages: pages.into_iter().map(Arc::new).collect(),
            attributes: Map::new(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The page consulted for sync grouping. Grouping is scoped to the
    /// first page; other pages are carried but never grouped across.
    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first().map(Arc::as_ref)
    }
}
