//! Left-to-right evaluation of condition sets against submitted values.
//!
//! Evaluation is a single pure pass over the row list. A running `result`
//! starts at `false`; each rule term overwrites it and each connector may
//! end the pass early: `or` returns `true` as soon as the running result is
//! `true`, `and` returns `false` as soon as it is `false`. This models
//! `term1 (AND term2) (OR term3) ...` in strict sequence order, with no
//! grouping or operator precedence.
//!
//! Submitted form data is untrusted: a path that does not resolve, a type
//! mismatch, or an unparsable number all coerce to empty/zero and never
//! error. The only error path is a structurally invalid row list, which is
//! rejected before the pass begins.

use regex::RegexBuilder;
use serde_json::Value;

use crate::core::row::ConditionRow;
use crate::core::set::ConditionSet;
use crate::core::values::ValueSource;
use crate::error::Result;

/// Evaluate a condition set against submitted values.
///
/// An empty set is always visible. Otherwise the set is validated first and
/// a structural error propagates before any row is evaluated.
///
/// Safe to call repeatedly and concurrently against the same frozen set.
///
/// # Examples
///
/// ```rust
/// use form_visibility::core::{ConditionSet, SubmittedValues, evaluate};
/// use serde_json::json;
///
/// let set = ConditionSet::new().equal("role", "admin").or().equal("role", "owner");
///
/// let values = SubmittedValues::new().with_value("role", json!("owner"));
/// assert!(evaluate(&set, &values).unwrap());
///
/// let values = SubmittedValues::new().with_value("role", json!("guest"));
/// assert!(!evaluate(&set, &values).unwrap());
/// ```
pub fn evaluate<S: ValueSource + ?Sized>(set: &ConditionSet, values: &S) -> Result<bool> {
    if set.is_empty() {
        return Ok(true);
    }
    set.validate()?;

    let mut result = false;
    for (position, row) in set.rows().iter().enumerate() {
        match row {
            ConditionRow::Or => {
                if result {
                    tracing::trace!(position, "or connector short-circuits, visible");
                    return Ok(true);
                }
            }
            ConditionRow::And => {
                if !result {
                    tracing::trace!(position, "and connector short-circuits, hidden");
                    return Ok(false);
                }
            }
            term => result = evaluate_term(term, values),
        }
    }

    tracing::trace!(visible = result, rows = set.len(), "condition set evaluated");
    Ok(result)
}

/// Evaluate a single rule term. Connectors never reach here once the
/// alternation invariant holds.
fn evaluate_term<S: ValueSource + ?Sized>(row: &ConditionRow, values: &S) -> bool {
    match row {
        ConditionRow::And | ConditionRow::Or => false,
        ConditionRow::Empty { field } => is_empty_value(values.lookup(field)),
        ConditionRow::NotEmpty { field } => !is_empty_value(values.lookup(field)),
        ConditionRow::Equal { field, value } => any_equal(values.lookup(field), value),
        ConditionRow::NotEqual { field, value } => !any_equal(values.lookup(field), value),
        ConditionRow::Like { field, value } => any_like(values.lookup(field), value),
        ConditionRow::NotLike { field, value } => !any_like(values.lookup(field), value),
        ConditionRow::GreaterThan { field, value } => numeric_form(values.lookup(field)) > *value,
        ConditionRow::GreaterThanEqual { field, value } => {
            numeric_form(values.lookup(field)) >= *value
        }
        ConditionRow::LowerThan { field, value } => numeric_form(values.lookup(field)) < *value,
        ConditionRow::LowerThanEqual { field, value } => {
            numeric_form(values.lookup(field)) <= *value
        }
    }
}

/// Empty means missing, null, empty string, empty list, or empty map.
fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}

/// True iff any submitted element string-equals any rule element.
///
/// Rule values iterate outer, submitted values inner; the first matching
/// pair decides. The negated kinds rely on exactly this short-circuit: one
/// equal pair disproves "not equal" regardless of the remaining elements.
fn any_equal(submitted: Option<&Value>, rule: &Value) -> bool {
    let submitted = comparison_list(submitted);
    let rules = rule_list(rule);
    rules
        .iter()
        .any(|rule| submitted.iter().any(|candidate| candidate == rule))
}

/// True iff any submitted element contains any rule element,
/// case-insensitively. The rule element is matched as a literal substring,
/// not as a user-authored pattern.
fn any_like(submitted: Option<&Value>, rule: &Value) -> bool {
    let submitted = comparison_list(submitted);
    let rules = rule_list(rule);
    rules.iter().any(|rule| {
        RegexBuilder::new(&regex::escape(rule))
            .case_insensitive(true)
            .build()
            .is_ok_and(|matcher| submitted.iter().any(|candidate| matcher.is_match(candidate)))
    })
}

/// Coerce the submitted value to the list of strings it compares as.
/// Missing and null values contribute nothing, so equality never matches
/// an absent field.
fn comparison_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(text_form).collect(),
        Some(scalar) => vec![text_form(scalar)],
    }
}

/// Coerce the rule value to its list form (wrap scalars in a singleton).
fn rule_list(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().map(text_form).collect(),
        scalar => vec![text_form(scalar)],
    }
}

/// String form of one element for exact/substring comparison.
fn text_form(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        // Nested containers inside a list compare by their compact JSON form.
        nested => nested.to_string(),
    }
}

/// Numeric form for the ordering kinds: lists and maps compare by element
/// count, strings parse as f64, anything unparsable collapses to zero.
fn numeric_form(value: Option<&Value>) -> f64 {
    match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        Some(Value::Array(items)) => items.len() as f64,
        Some(Value::Object(map)) => map.len() as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::values::SubmittedValues;
    use serde_json::json;

    fn term(row: ConditionRow, values: &SubmittedValues) -> bool {
        evaluate_term(&row, values)
    }

    fn with(key: &str, value: Value) -> SubmittedValues {
        SubmittedValues::new().with_value(key, value)
    }

    #[test]
    fn test_empty_term() {
        assert!(term(ConditionRow::empty("x"), &with("x", json!(""))));
        assert!(term(ConditionRow::empty("x"), &with("x", json!(null))));
        assert!(term(ConditionRow::empty("x"), &with("x", json!([]))));
        assert!(term(ConditionRow::empty("x"), &SubmittedValues::new()));
        assert!(!term(ConditionRow::empty("x"), &with("x", json!("a"))));
        assert!(!term(ConditionRow::empty("x"), &with("x", json!(0))));
    }

    #[test]
    fn test_not_empty_term() {
        assert!(term(ConditionRow::not_empty("x"), &with("x", json!("a"))));
        assert!(!term(ConditionRow::not_empty("x"), &with("x", json!(""))));
        assert!(!term(ConditionRow::not_empty("x"), &SubmittedValues::new()));
    }

    #[test]
    fn test_equal_scalar() {
        assert!(term(ConditionRow::equal("x", "a"), &with("x", json!("a"))));
        assert!(!term(ConditionRow::equal("x", "a"), &with("x", json!("b"))));
    }

    #[test]
    fn test_equal_any_match_on_lists() {
        assert!(term(
            ConditionRow::equal("x", "a"),
            &with("x", json!(["a", "b"]))
        ));
        assert!(term(
            ConditionRow::equal("x", json!(["a", "c"])),
            &with("x", json!("c"))
        ));
        assert!(!term(
            ConditionRow::equal("x", json!(["a", "c"])),
            &with("x", json!(["b", "d"]))
        ));
    }

    #[test]
    fn test_equal_compares_string_forms() {
        // "5" submitted by a form equals the numeric rule value 5.
        assert!(term(ConditionRow::equal("x", 5), &with("x", json!("5"))));
        assert!(term(ConditionRow::equal("x", "5"), &with("x", json!(5))));
        assert!(term(ConditionRow::equal("x", true), &with("x", json!("true"))));
    }

    #[test]
    fn test_equal_missing_field_never_matches() {
        assert!(!term(ConditionRow::equal("x", ""), &SubmittedValues::new()));
        assert!(term(
            ConditionRow::not_equal("x", "a"),
            &SubmittedValues::new()
        ));
    }

    #[test]
    fn test_not_equal_one_match_disproves() {
        assert!(term(ConditionRow::not_equal("x", "a"), &with("x", json!("b"))));
        assert!(!term(ConditionRow::not_equal("x", "a"), &with("x", json!("a"))));
        assert!(!term(
            ConditionRow::not_equal("x", "a"),
            &with("x", json!(["a", "b"]))
        ));
        assert!(!term(
            ConditionRow::not_equal("x", json!(["a", "z"])),
            &with("x", json!(["b", "z"]))
        ));
    }

    #[test]
    fn test_like_is_case_insensitive_containment() {
        assert!(term(
            ConditionRow::like("x", "api"),
            &with("x", json!("My API Key"))
        ));
        assert!(term(
            ConditionRow::like("x", "BER"),
            &with("x", json!(["munich", "berlin"]))
        ));
        assert!(!term(ConditionRow::like("x", "api"), &with("x", json!("oauth"))));
    }

    #[test]
    fn test_like_treats_rule_as_literal() {
        // Regex metacharacters in the rule value must not act as a pattern.
        assert!(term(
            ConditionRow::like("x", "a.b"),
            &with("x", json!("has a.b inside"))
        ));
        assert!(!term(ConditionRow::like("x", "a.b"), &with("x", json!("axb"))));
    }

    #[test]
    fn test_not_like() {
        assert!(term(ConditionRow::not_like("x", "api"), &with("x", json!("oauth"))));
        assert!(!term(
            ConditionRow::not_like("x", "api"),
            &with("x", json!(["oauth", "API key"]))
        ));
        assert!(term(ConditionRow::not_like("x", "api"), &SubmittedValues::new()));
    }

    #[test]
    fn test_greater_than_numeric_coercion() {
        assert!(term(ConditionRow::greater_than("x", 3.0), &with("x", json!("5"))));
        assert!(term(ConditionRow::greater_than("x", 3.0), &with("x", json!(4))));
        assert!(!term(ConditionRow::greater_than("x", 3.0), &with("x", json!("2"))));
        assert!(!term(ConditionRow::greater_than("x", 3.0), &with("x", json!(3))));
    }

    #[test]
    fn test_ordering_compares_list_length() {
        let values = with("x", json!([1, 2, 3, 4]));
        assert!(term(ConditionRow::greater_than("x", 3.0), &values));
        assert!(term(ConditionRow::greater_than_equal("x", 4.0), &values));
        assert!(!term(ConditionRow::lower_than("x", 4.0), &values));
        assert!(term(ConditionRow::lower_than_equal("x", 4.0), &values));
    }

    #[test]
    fn test_ordering_on_missing_or_garbage_is_zero() {
        assert!(term(ConditionRow::lower_than("x", 1.0), &SubmittedValues::new()));
        assert!(term(
            ConditionRow::lower_than("x", 1.0),
            &with("x", json!("not a number"))
        ));
        assert!(!term(
            ConditionRow::greater_than("x", 0.0),
            &with("x", json!("not a number"))
        ));
    }

    #[test]
    fn test_empty_set_is_visible() {
        let values = SubmittedValues::new();
        assert!(evaluate(&ConditionSet::new(), &values).unwrap());
    }

    #[test]
    fn test_invalid_structure_propagates() {
        let set = ConditionSet::new().and();
        let values = SubmittedValues::new();
        assert!(evaluate(&set, &values).is_err());
    }

    #[test]
    fn test_and_chain() {
        let set = ConditionSet::new().equal("a", "1").and().equal("b", "2");

        let values = with("a", json!("1")).with_value("b", json!("2"));
        assert!(evaluate(&set, &values).unwrap());

        let values = with("a", json!("1")).with_value("b", json!("3"));
        assert!(!evaluate(&set, &values).unwrap());
    }

    #[test]
    fn test_or_chain() {
        let set = ConditionSet::new().equal("a", "1").or().equal("b", "2");

        let values = with("a", json!("0")).with_value("b", json!("2"));
        assert!(evaluate(&set, &values).unwrap());

        let values = with("a", json!("0")).with_value("b", json!("0"));
        assert!(!evaluate(&set, &values).unwrap());
    }

    #[test]
    fn test_sequence_has_no_precedence() {
        // a AND b OR c, left to right: (a AND b) OR c.
        let set = ConditionSet::new()
            .equal("a", "1")
            .and()
            .equal("b", "1")
            .or()
            .equal("c", "1");

        let values = with("a", json!("0"))
            .with_value("b", json!("0"))
            .with_value("c", json!("1"));
        assert!(evaluate(&set, &values).unwrap());
    }

    #[test]
    fn test_trailing_connector_keeps_result() {
        let set = ConditionSet::new().equal("a", "1").and();
        assert!(evaluate(&set, &with("a", json!("1"))).unwrap());
        assert!(!evaluate(&set, &with("a", json!("0"))).unwrap());
    }

    #[test]
    fn test_fresh_values_per_call() {
        let set = ConditionSet::new().not_empty("note");
        assert!(evaluate(&set, &with("note", json!("hi"))).unwrap());
        assert!(!evaluate(&set, &with("note", json!(""))).unwrap());
        assert!(evaluate(&set, &with("note", json!("again"))).unwrap());
    }
}
