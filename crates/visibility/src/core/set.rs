//! Ordered visibility rule sets with a fluent builder.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::evaluator;
use crate::core::path::FieldRef;
use crate::core::row::ConditionRow;
use crate::core::values::ValueSource;
use crate::error::{ConditionError, Result};

/// Ordered list of visibility rule rows belonging to one field.
///
/// Rows alternate between rule terms and `and`/`or` connectors, starting
/// with a term; [`ConditionSet::validate`] enforces the alternation. An
/// empty set means "always visible".
///
/// The builder methods append rows in call order and return `self` for
/// chaining. Once attached to a field the set should be treated as frozen:
/// evaluation is read-only and may run concurrently against the same set.
///
/// # Examples
///
/// ```rust
/// use form_visibility::core::{ConditionSet, SubmittedValues};
/// use serde_json::json;
///
/// let set = ConditionSet::new()
///     .equal("role", "admin")
///     .and()
///     .not_empty("note");
///
/// let values = SubmittedValues::new()
///     .with_value("role", json!("admin"))
///     .with_value("note", json!("hi"));
///
/// assert!(set.evaluate(&values).unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionSet {
    rows: Vec<ConditionRow>,
}

impl ConditionSet {
    /// Create an empty condition set (always visible).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Append an `and` connector.
    #[must_use]
    pub fn and(mut self) -> Self {
        self.rows.push(ConditionRow::And);
        self
    }

    /// Append an `or` connector.
    #[must_use]
    pub fn or(mut self) -> Self {
        self.rows.push(ConditionRow::Or);
        self
    }

    /// Append an emptiness term.
    #[must_use]
    pub fn empty(mut self, field: impl Into<FieldRef>) -> Self {
        self.rows.push(ConditionRow::empty(field));
        self
    }

    /// Append a non-emptiness term.
    #[must_use]
    pub fn not_empty(mut self, field: impl Into<FieldRef>) -> Self {
        self.rows.push(ConditionRow::not_empty(field));
        self
    }

    /// Append an equality term.
    #[must_use]
    pub fn equal(mut self, field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        self.rows.push(ConditionRow::equal(field, value));
        self
    }

    /// Append a non-equality term.
    #[must_use]
    pub fn not_equal(mut self, field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        self.rows.push(ConditionRow::not_equal(field, value));
        self
    }

    /// Append a case-insensitive containment term.
    #[must_use]
    pub fn like(mut self, field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        self.rows.push(ConditionRow::like(field, value));
        self
    }

    /// Append a negated case-insensitive containment term.
    #[must_use]
    pub fn not_like(mut self, field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        self.rows.push(ConditionRow::not_like(field, value));
        self
    }

    /// Append a greater-than term.
    #[must_use]
    pub fn greater_than(mut self, field: impl Into<FieldRef>, value: impl Into<f64>) -> Self {
        self.rows.push(ConditionRow::greater_than(field, value));
        self
    }

    /// Append a greater-than-or-equal term.
    #[must_use]
    pub fn greater_than_equal(mut self, field: impl Into<FieldRef>, value: impl Into<f64>) -> Self {
        self.rows.push(ConditionRow::greater_than_equal(field, value));
        self
    }

    /// Append a lower-than term.
    #[must_use]
    pub fn lower_than(mut self, field: impl Into<FieldRef>, value: impl Into<f64>) -> Self {
        self.rows.push(ConditionRow::lower_than(field, value));
        self
    }

    /// Append a lower-than-or-equal term.
    #[must_use]
    pub fn lower_than_equal(mut self, field: impl Into<FieldRef>, value: impl Into<f64>) -> Self {
        self.rows.push(ConditionRow::lower_than_equal(field, value));
        self
    }

    /// Append an arbitrary row.
    pub fn push(&mut self, row: ConditionRow) {
        self.rows.push(row);
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Remove all rows, returning the set to "always visible".
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// True iff no rows were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows (terms and connectors).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// The rows in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[ConditionRow] {
        &self.rows
    }

    /// All fields referenced by this set, de-duplicated in insertion order.
    ///
    /// The client mirror uses this to know which inputs to watch.
    #[must_use]
    pub fn depends_on(&self) -> Vec<&FieldRef> {
        let mut fields: Vec<&FieldRef> = Vec::new();
        for row in &self.rows {
            if let Some(field) = row.field()
                && !fields.contains(&field)
            {
                fields.push(field);
            }
        }
        fields
    }

    // =========================================================================
    // Validation & serialization
    // =========================================================================

    /// Check the connector/term alternation invariant.
    ///
    /// Every row at an odd zero-based position must be a connector and every
    /// row at an even position must be a rule term.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError::InvalidStructure`] naming the first
    /// offending row. This is a construction bug in the rule set, not a
    /// data error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use form_visibility::core::ConditionSet;
    ///
    /// let set = ConditionSet::new().equal("a", "1").and().equal("b", "2");
    /// assert!(set.validate().is_ok());
    ///
    /// let set = ConditionSet::new().equal("a", "1").equal("b", "2");
    /// assert!(set.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        for (position, row) in self.rows.iter().enumerate() {
            let connector_slot = position % 2 == 1;
            if connector_slot != row.is_connector() {
                let expected = if connector_slot { "connector" } else { "condition" };
                return Err(ConditionError::invalid_structure(
                    position,
                    expected,
                    row.kind(),
                ));
            }
        }
        Ok(())
    }

    /// Serialize the row list for the client-side mirror.
    ///
    /// Produces the ordered array of `{type, field, value}` records the
    /// client evaluator re-evaluates against live input. Validates first, so
    /// a malformed set never reaches the client.
    pub fn to_client_json(&self) -> Result<Value> {
        self.validate()?;
        Ok(serde_json::to_value(self)?)
    }

    /// Evaluate this set against submitted values.
    ///
    /// Forwards to [`crate::core::evaluate`]; see there for the semantics.
    pub fn evaluate<S: ValueSource + ?Sized>(&self, values: &S) -> Result<bool> {
        evaluator::evaluate(self, values)
    }
}

// =============================================================================
// Standard trait implementations
// =============================================================================

impl FromIterator<ConditionRow> for ConditionSet {
    fn from_iter<T: IntoIterator<Item = ConditionRow>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl Extend<ConditionRow> for ConditionSet {
    fn extend<T: IntoIterator<Item = ConditionRow>>(&mut self, iter: T) {
        self.rows.extend(iter);
    }
}

impl IntoIterator for ConditionSet {
    type Item = ConditionRow;
    type IntoIter = std::vec::IntoIter<ConditionRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConditionSet {
    type Item = &'a ConditionRow;
    type IntoIter = std::slice::Iter<'a, ConditionRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
