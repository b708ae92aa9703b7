//! Field visibility condition engine for dynamic forms.
//!
//! Decides, from a set of submitted form values, whether a field should be
//! shown. A field owner builds a [`ConditionSet`] — an ordered list of rule
//! terms joined by `and`/`or` connectors — and the engine evaluates it
//! left-to-right with short-circuit semantics against the current
//! [`SubmittedValues`]. The result gates both rendering and required-field
//! validation in the consuming form layer.
//!
//! The same rule list serializes to an ordered array of
//! `{type, field, value}` records ([`ConditionSet::to_client_json`]) so a
//! client-side mirror can re-evaluate identical semantics against live,
//! unsubmitted input.
//!
//! # Examples
//!
//! ```rust
//! use form_visibility::prelude::*;
//! use serde_json::json;
//!
//! // Show the "note" hint only for admins with a non-empty note.
//! let set = ConditionSet::new()
//!     .equal("role", "admin")
//!     .and()
//!     .not_empty("note");
//!
//! let values = SubmittedValues::new()
//!     .with_value("role", json!("admin"))
//!     .with_value("note", json!("hi"));
//! assert!(set.evaluate(&values).unwrap());
//!
//! let values = SubmittedValues::new().with_value("role", json!("user"));
//! assert!(!set.evaluate(&values).unwrap());
//! ```

pub mod core;
pub mod error;

// Re-export core functionality
pub use crate::core::{
    ConditionRow, ConditionSet, FieldRef, PathSegment, SubmittedValues, ValueSource, evaluate,
};
pub use crate::error::{ConditionError, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        ConditionRow, ConditionSet, FieldRef, SubmittedValues, ValueSource, evaluate,
    };
    pub use crate::error::{ConditionError, Result};
}
