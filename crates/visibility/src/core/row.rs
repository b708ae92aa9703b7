//! Condition rows: rule terms and logical connectors.
//!
//! A [`ConditionRow`] is one entry in a condition set — either a comparison
//! against a submitted field value, or an `and`/`or` connector joining two
//! neighbouring comparisons. The serde representation is the wire contract
//! with the client-side mirror: an internally tagged record whose `type` tag
//! must stay stable (`equal`, `notEmpty`, `greaterThanEqual`, ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::path::FieldRef;

/// One rule term or logical connector within a condition set.
///
/// # Examples
///
/// ```rust
/// use form_visibility::core::ConditionRow;
///
/// let row = ConditionRow::equal("role", "admin");
/// assert_eq!(row.kind(), "equal");
/// assert!(!row.is_connector());
/// assert!(ConditionRow::And.is_connector());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConditionRow {
    /// Logical AND connector between two neighbouring terms.
    And,

    /// Logical OR connector between two neighbouring terms.
    Or,

    /// Submitted value is missing, null, an empty list, or an empty string.
    Empty {
        /// The field to check
        field: FieldRef,
    },

    /// Negation of [`ConditionRow::Empty`].
    NotEmpty {
        /// The field to check
        field: FieldRef,
    },

    /// Any submitted element string-equals any rule element.
    Equal {
        /// The field to check
        field: FieldRef,
        /// Scalar or list of scalars to compare against
        value: Value,
    },

    /// No submitted element string-equals any rule element.
    NotEqual {
        /// The field to check
        field: FieldRef,
        /// Scalar or list of scalars to compare against
        value: Value,
    },

    /// Any submitted element contains any rule element, case-insensitively.
    Like {
        /// The field to check
        field: FieldRef,
        /// Scalar or list of scalars to match as literal substrings
        value: Value,
    },

    /// No submitted element contains any rule element, case-insensitively.
    NotLike {
        /// The field to check
        field: FieldRef,
        /// Scalar or list of scalars to match as literal substrings
        value: Value,
    },

    /// Numeric form of the submitted value is greater than the threshold.
    /// Lists compare by element count.
    GreaterThan {
        /// The field to check
        field: FieldRef,
        /// Numeric threshold
        value: f64,
    },

    /// Numeric form of the submitted value is greater than or equal to the
    /// threshold. Lists compare by element count.
    GreaterThanEqual {
        /// The field to check
        field: FieldRef,
        /// Numeric threshold
        value: f64,
    },

    /// Numeric form of the submitted value is lower than the threshold.
    /// Lists compare by element count.
    LowerThan {
        /// The field to check
        field: FieldRef,
        /// Numeric threshold
        value: f64,
    },

    /// Numeric form of the submitted value is lower than or equal to the
    /// threshold. Lists compare by element count.
    LowerThanEqual {
        /// The field to check
        field: FieldRef,
        /// Numeric threshold
        value: f64,
    },
}

impl ConditionRow {
    /// Create an emptiness term.
    pub fn empty(field: impl Into<FieldRef>) -> Self {
        Self::Empty {
            field: field.into(),
        }
    }

    /// Create a non-emptiness term.
    pub fn not_empty(field: impl Into<FieldRef>) -> Self {
        Self::NotEmpty {
            field: field.into(),
        }
    }

    /// Create an equality term.
    pub fn equal(field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        Self::Equal {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a non-equality term.
    pub fn not_equal(field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        Self::NotEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a case-insensitive containment term.
    pub fn like(field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        Self::Like {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a negated case-insensitive containment term.
    pub fn not_like(field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        Self::NotLike {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a greater-than term.
    pub fn greater_than(field: impl Into<FieldRef>, value: impl Into<f64>) -> Self {
        Self::GreaterThan {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a greater-than-or-equal term.
    pub fn greater_than_equal(field: impl Into<FieldRef>, value: impl Into<f64>) -> Self {
        Self::GreaterThanEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a lower-than term.
    pub fn lower_than(field: impl Into<FieldRef>, value: impl Into<f64>) -> Self {
        Self::LowerThan {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a lower-than-or-equal term.
    pub fn lower_than_equal(field: impl Into<FieldRef>, value: impl Into<f64>) -> Self {
        Self::LowerThanEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether this row is an `and`/`or` connector rather than a rule term.
    #[must_use]
    pub fn is_connector(&self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    /// The wire tag for this row, as serialized for the client mirror.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Empty { .. } => "empty",
            Self::NotEmpty { .. } => "notEmpty",
            Self::Equal { .. } => "equal",
            Self::NotEqual { .. } => "notEqual",
            Self::Like { .. } => "like",
            Self::NotLike { .. } => "notLike",
            Self::GreaterThan { .. } => "greaterThan",
            Self::GreaterThanEqual { .. } => "greaterThanEqual",
            Self::LowerThan { .. } => "lowerThan",
            Self::LowerThanEqual { .. } => "lowerThanEqual",
        }
    }

    /// The field this row compares, if it is a rule term.
    #[must_use]
    pub fn field(&self) -> Option<&FieldRef> {
        match self {
            Self::And | Self::Or => None,
            Self::Empty { field }
            | Self::NotEmpty { field }
            | Self::Equal { field, .. }
            | Self::NotEqual { field, .. }
            | Self::Like { field, .. }
            | Self::NotLike { field, .. }
            | Self::GreaterThan { field, .. }
            | Self::GreaterThanEqual { field, .. }
            | Self::LowerThan { field, .. }
            | Self::LowerThanEqual { field, .. } => Some(field),
        }
    }
}
