//! # Cheat Sheet Documents
//!
//! A document is a free-form string-keyed mapping. Only `columns` and
//! `categories` get defaults when read; everything else passes through.

use serde_json::{json, Map, Value};

use super::errors::{StoreError, StoreResult};

/// Document content as stored on disk
pub type Content = Map<String, Value>;

/// Default number of display columns
pub const DEFAULT_COLUMNS: i64 = 1;

/// A named cheat sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub name: String,
    pub content: Content,
}

impl Document {
    pub fn new(name: impl Into<String>, content: Content) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// `columns` as stored, or 1 when absent
    pub fn columns(&self) -> Value {
        self.content
            .get("columns")
            .cloned()
            .unwrap_or_else(|| json!(DEFAULT_COLUMNS))
    }

    /// `categories` as stored, or an empty sequence when absent
    pub fn categories(&self) -> Value {
        self.content
            .get("categories")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }

    /// Serialize the content mapping to YAML
    pub fn to_yaml(&self) -> StoreResult<String> {
        serde_yaml::to_string(&self.content)
            .map_err(|e| StoreError::malformed(&self.name, e.to_string()))
    }

    /// Parse a document from YAML bytes. An empty file is an empty mapping.
    pub fn from_yaml(name: &str, bytes: &[u8]) -> StoreResult<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::new(name, Content::new()));
        }

        let value: Value = serde_yaml::from_slice(bytes)
            .map_err(|e| StoreError::malformed(name, e.to_string()))?;

        let content = match value {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(StoreError::malformed(
                    name,
                    format!("expected a mapping at top level, found {}", kind(&other)),
                ))
            }
        };

        Ok(Self::new(name, content))
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
