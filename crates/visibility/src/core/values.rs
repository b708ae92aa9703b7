//! Submitted form values and the evaluator's lookup seam.
//!
//! [`SubmittedValues`] holds the current user-entered values across a form,
//! keyed by field name with arbitrary nesting. It is supplied fresh by the
//! form layer per evaluation call and never mutated by the evaluator.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::path::{FieldRef, PathSegment};

/// Lookup seam between the evaluator and submitted form data.
///
/// The evaluator only ever reads values through this trait, so tests and
/// alternative stores can substitute their own source.
pub trait ValueSource {
    /// Look up the value at `field`, or `None` when the path does not resolve.
    fn lookup(&self, field: &FieldRef) -> Option<&Value>;
}

/// Read-only map of submitted form values.
///
/// # Examples
///
/// ```rust
/// use form_visibility::core::{FieldRef, SubmittedValues, ValueSource};
/// use serde_json::json;
///
/// let values = SubmittedValues::new()
///     .with_value("role", json!("admin"))
///     .with_value("address", json!({"city": "Berlin"}));
///
/// assert_eq!(values.lookup(&FieldRef::new("address[city]")), Some(&json!("Berlin")));
/// assert_eq!(values.lookup(&FieldRef::new("address[zip]")), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmittedValues {
    values: Map<String, Value>,
}

impl SubmittedValues {
    /// Create an empty value map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: add a value and return self.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Insert a value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Get a top-level value by field name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Check if a top-level field is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of top-level fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no fields were submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get direct access to the underlying map (read-only).
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}

impl ValueSource for SubmittedValues {
    fn lookup(&self, field: &FieldRef) -> Option<&Value> {
        let segments = field.segments();
        let (first, rest) = segments.split_first()?;

        let mut current = match first {
            PathSegment::Key(key) => self.values.get(key)?,
            // Numeric first segment: form data is keyed by name, but a
            // numeric name is still a valid key.
            PathSegment::Index(index) => self.values.get(&index.to_string())?,
        };

        for segment in rest {
            current = match (current, segment) {
                (Value::Object(map), PathSegment::Key(key)) => map.get(key)?,
                (Value::Array(items), PathSegment::Index(index)) => items.get(*index)?,
                // Numeric segment on an object falls back to the same-named key.
                (Value::Object(map), PathSegment::Index(index)) => {
                    map.get(&index.to_string())?
                }
                _ => return None,
            };
        }

        Some(current)
    }
}

impl From<Map<String, Value>> for SubmittedValues {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl FromIterator<(String, Value)> for SubmittedValues {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, Value)> for SubmittedValues {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.values.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(s: &str) -> FieldRef {
        FieldRef::new(s)
    }

    #[test]
    fn test_basic_operations() {
        let mut values = SubmittedValues::new();
        values.insert("name", json!("Alice"));
        values.insert("age", json!(30));

        assert_eq!(values.len(), 2);
        assert!(values.contains("name"));
        assert_eq!(values.get("name"), Some(&json!("Alice")));
        assert_eq!(values.get("missing"), None);
    }

    #[test]
    fn test_lookup_top_level() {
        let values = SubmittedValues::new().with_value("role", json!("admin"));
        assert_eq!(values.lookup(&field("role")), Some(&json!("admin")));
        assert_eq!(values.lookup(&field("other")), None);
    }

    #[test]
    fn test_lookup_nested_object() {
        let values =
            SubmittedValues::new().with_value("address", json!({"city": "Berlin", "zip": "10178"}));

        assert_eq!(values.lookup(&field("address[city]")), Some(&json!("Berlin")));
        assert_eq!(values.lookup(&field("address.zip")), Some(&json!("10178")));
        assert_eq!(values.lookup(&field("address[country]")), None);
    }

    #[test]
    fn test_lookup_array_index() {
        let values = SubmittedValues::new().with_value("items", json!(["a", "b"]));

        assert_eq!(values.lookup(&field("items[1]")), Some(&json!("b")));
        assert_eq!(values.lookup(&field("items[2]")), None);
    }

    #[test]
    fn test_lookup_numeric_key_on_object() {
        let values = SubmittedValues::new().with_value("rows", json!({"0": "first"}));
        assert_eq!(values.lookup(&field("rows[0]")), Some(&json!("first")));
    }

    #[test]
    fn test_lookup_type_mismatch_is_missing() {
        let values = SubmittedValues::new().with_value("name", json!("Alice"));
        assert_eq!(values.lookup(&field("name[first]")), None);
        assert_eq!(values.lookup(&field("name[0]")), None);
    }

    #[test]
    fn test_lookup_empty_path_is_missing() {
        let values = SubmittedValues::new().with_value("x", json!(1));
        assert_eq!(values.lookup(&field("")), None);
    }

    #[test]
    fn test_from_json_object() {
        let values: SubmittedValues =
            serde_json::from_value(json!({"a": "1", "b": ["x", "y"]})).expect("deserialize");

        assert_eq!(values.len(), 2);
        assert_eq!(values.lookup(&field("b[0]")), Some(&json!("x")));
    }

    #[test]
    fn test_from_iterator() {
        let values: SubmittedValues = vec![
            ("a".to_string(), json!(1)),
            ("b".to_string(), json!(2)),
        ]
        .into_iter()
        .collect();

        assert_eq!(values.len(), 2);
    }
}
