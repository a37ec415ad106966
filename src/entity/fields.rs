use std::collections::BTreeMap;
use crate::core::types::FieldValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMismatch {
    pub field: String,
    pub expected: &'static str,
    pub found: &'static str,
}

/// Typed accessors over a stored field map.
pub struct FieldReader<'a> {
    fields: &'a BTreeMap<String, FieldValue>,
    mismatches: Vec<FieldMismatch>,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a BTreeMap<String, FieldValue>) -> Self {
        FieldReader {
            fields,
            mismatches: Vec::new(),
        }
    }

    pub fn text(&mut self, name: &str) -> String {
        self.optional_text(name).unwrap_or_default()
    }

    pub fn optional_text(&mut self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            FieldValue::Text(text) => Some(text.clone()),
            other => {
                self.mismatch(name, "text", other);
                None
            }
        }
    }

    pub fn i64(&mut self, name: &str) -> i64 {
        match self.fields.get(name) {
            None => 0,
            Some(FieldValue::Integer(value)) => *value,
            Some(other) => {
                self.mismatch(name, "integer", other);
                0
            }
        }
    }

    pub fn u32(&mut self, name: &str) -> u32 {
        match self.fields.get(name) {
            None => 0,
            Some(FieldValue::Integer(value)) => match u32::try_from(*value) {
                Ok(value) => value,
                Err(_) => {
                    self.mismatches.push(FieldMismatch {
                        field: name.to_string(),
                        expected: "u32",
                        found: "out-of-range integer",
                    });
                    0
                }
            },
            Some(other) => {
                self.mismatch(name, "u32", other);
                0
            }
        }
    }

    pub fn bool(&mut self, name: &str) -> bool {
        match self.fields.get(name) {
            None => false,
            Some(FieldValue::Boolean(value)) => *value,
            Some(other) => {
                self.mismatch(name, "boolean", other);
                false
            }
        }
    }

    pub fn finish(self) -> Vec<FieldMismatch> {
        self.mismatches
    }

    fn mismatch(&mut self, name: &str, expected: &'static str, found: &FieldValue) {
        self.mismatches.push(FieldMismatch {
            field: name.to_string(),
            expected,
            found: found.type_name(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_default_silently() {
        let fields = BTreeMap::new();
        let mut reader = FieldReader::new(&fields);
        assert_eq!(reader.text("title"), "");
        assert_eq!(reader.optional_text("bio"), None);
        assert_eq!(reader.u32("year"), 0);
        assert!(!reader.bool("is_directory"));
        assert!(reader.finish().is_empty());
    }

    #[test]
    fn mismatched_fields_default_and_are_reported() {
        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), FieldValue::Integer(7));
        fields.insert("year".to_string(), FieldValue::Text("1975".to_string()));
        fields.insert("length".to_string(), FieldValue::Integer(-1));
        fields.insert("name".to_string(), FieldValue::Text("Queen".to_string()));

        let mut reader = FieldReader::new(&fields);
        assert_eq!(reader.text("title"), "");
        assert_eq!(reader.u32("year"), 0);
        assert_eq!(reader.u32("length"), 0);
        assert_eq!(reader.text("name"), "Queen");

        let mismatches = reader.finish();
        assert_eq!(mismatches.len(), 3);
        assert_eq!(mismatches[0], FieldMismatch {
            field: "title".to_string(),
            expected: "text",
            found: "integer",
        });
        assert_eq!(mismatches[2].found, "out-of-range integer");
    }
}
