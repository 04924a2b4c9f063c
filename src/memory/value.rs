//! Runtime value representation
//!
//! This module defines the [`Value`] enum held by every variable. A variable is
//! either a scalar or an array, never both, so the two cases are variants of
//! one tagged type rather than two optional fields.
//!
//! # Value Types
//!
//! - [`Value::Scalar`]: a single piece of text, string or number alike
//! - [`Value::List`]: an [`ArrayValue`] built from a bracket literal
//!
//! A variable that exists but holds neither (for example the key variable of a
//! `foreach` over an indexed array) is represented by the environment as an
//! absent value, not by a third variant.

/// Runtime values in the interpreter
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(String),
    List(ArrayValue),
}

impl Value {
    /// Get the scalar text, returns None if this is an array
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(text) => Some(text),
            Value::List(_) => None,
        }
    }

    /// Get the array, returns None if this is a scalar
    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::List(array) => Some(array),
            Value::Scalar(_) => None,
        }
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Scalar(text)
    }
}

impl From<ArrayValue> for Value {
    fn from(array: ArrayValue) -> Self {
        Value::List(array)
    }
}

/// One array entry; `key` is `None` for indexed entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayEntry {
    pub key: Option<String>,
    pub value: String,
}

impl ArrayEntry {
    pub fn indexed(value: impl Into<String>) -> Self {
        Self {
            key: None,
            value: value.into(),
        }
    }

    pub fn keyed(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }
}

/// Ordered sequence of optionally-keyed scalar entries.
///
/// Built once; there is no per-entry mutation. Reassigning the variable
/// replaces the whole array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayValue {
    entries: Vec<ArrayEntry>,
}

impl ArrayValue {
    pub fn new(entries: Vec<ArrayEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ArrayEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArrayEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ArrayEntry> for ArrayValue {
    fn from_iter<I: IntoIterator<Item = ArrayEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ArrayValue {
    type Item = &'a ArrayEntry;
    type IntoIter = std::slice::Iter<'a, ArrayEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_and_list_are_exclusive() {
        let scalar = Value::from("5".to_string());
        assert_eq!(scalar.as_scalar(), Some("5"));
        assert!(scalar.as_array().is_none());

        let list = Value::from(ArrayValue::new(vec![ArrayEntry::indexed("1")]));
        assert!(list.as_scalar().is_none());
        assert_eq!(list.as_array().map(ArrayValue::len), Some(1));
    }

    #[test]
    fn test_array_preserves_order() {
        let array: ArrayValue = vec![
            ArrayEntry::keyed("y", "2"),
            ArrayEntry::keyed("x", "1"),
            ArrayEntry::indexed("3"),
        ]
        .into_iter()
        .collect();

        let keys: Vec<Option<&str>> = array.iter().map(|e| e.key.as_deref()).collect();
        assert_eq!(keys, vec![Some("y"), Some("x"), None]);
    }
}
