use thiserror::Error;

/// Main error type for condition operations.
///
/// Structural errors are construction bugs in the rule set, not data errors:
/// they surface to the developer and are not recoverable by retry. Malformed
/// or missing submitted values never error — the evaluator absorbs them as
/// empty/non-matching (untrusted form data may be partial or malformed).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConditionError {
    /// Connector/term alternation was violated: rows must alternate between
    /// rule terms and `and`/`or` connectors, starting with a term.
    #[error("invalid condition structure at row {position}: expected {expected}, found {found}")]
    InvalidStructure {
        /// Zero-based index of the offending row
        position: usize,
        /// What the alternation invariant requires at this position
        expected: &'static str,
        /// The row kind actually found
        found: &'static str,
    },

    /// Error serializing the rule list for the client mirror
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ConditionError {
    /// Create an "invalid structure" error.
    pub fn invalid_structure(position: usize, expected: &'static str, found: &'static str) -> Self {
        Self::InvalidStructure {
            position,
            expected,
            found,
        }
    }

    /// Get the error category for logging/metrics.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidStructure { .. } => "invalid_structure",
            Self::Serialization(_) => "serialization_error",
        }
    }
}

/// Result type alias for condition operations
pub type Result<T> = std::result::Result<T, ConditionError>;

/// Convert from `serde_json` errors
impl From<serde_json::Error> for ConditionError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}
