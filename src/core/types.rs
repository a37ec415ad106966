use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use std::fmt;

/// Store-local ordinal of a document. Reassigned whenever a document is
/// replaced and when a store is reloaded; never exposed across the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
}

impl FieldValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Integer(_) => "integer",
            FieldValue::Boolean(_) => "boolean",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{}", text),
            FieldValue::Integer(value) => write!(f, "{}", value),
            FieldValue::Boolean(value) => write!(f, "{}", value),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

/// A stored record: the entity's `id` plus every field, by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub key: String,
    pub fields: BTreeMap<String, FieldValue>,
}

impl Document {
    pub fn new(key: impl Into<String>) -> Self {
        Document {
            key: key.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Adds the field only when a value is present, so optional entity fields
    /// stay absent instead of being stored as empty text.
    pub fn add_optional(&mut self, name: impl Into<String>, value: Option<impl Into<FieldValue>>) {
        if let Some(value) = value {
            self.add_field(name, value);
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.add_field(name, value);
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text values in field-name order; the only values the analyzer sees.
    pub fn text_values(&self) -> impl Iterator<Item = &str> {
        self.fields.values().filter_map(FieldValue::as_text)
    }
}
