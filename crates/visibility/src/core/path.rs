//! Field path references into submitted form data.
//!
//! Paths use the dotted/bracketed syntax form fields are named with:
//! `user.name`, `address[city]`, `items[0]`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path segment for navigating submitted values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Map key access: `.key` or `[key]`
    Key(String),
    /// Array index access: `[0]`
    Index(usize),
}

/// Reference to a value inside submitted form data.
///
/// A `FieldRef` is a plain path string; it is parsed into segments at lookup
/// time. Parsing is lenient by design — form data is untrusted, so a path
/// that does not resolve means "missing value", never an error.
///
/// # Examples
///
/// ```rust
/// use form_visibility::core::FieldRef;
///
/// let field = FieldRef::new("address[city]");
/// assert_eq!(field.as_str(), "address[city]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRef(String);

impl FieldRef {
    /// Create a field reference from a path string.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Get the raw path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the path into navigation segments.
    ///
    /// Bracket segments holding an unsigned integer become [`PathSegment::Index`],
    /// everything else becomes [`PathSegment::Key`]. An unclosed bracket is
    /// treated as if it were closed at the end of the path.
    #[must_use]
    pub fn segments(&self) -> Vec<PathSegment> {
        parse_path(&self.0)
    }
}

impl From<&str> for FieldRef {
    fn from(path: &str) -> Self {
        Self(path.to_owned())
    }
}

impl From<String> for FieldRef {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a path string into segments.
///
/// Examples:
/// - `"user.name"` -> `[Key("user"), Key("name")]`
/// - `"address[city]"` -> `[Key("address"), Key("city")]`
/// - `"items[0].id"` -> `[Key("items"), Index(0), Key("id")]`
fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current)));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current)));
                }

                let mut inner = String::new();
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == ']' {
                        break;
                    }
                    inner.push(next);
                }

                if inner.is_empty() {
                    continue;
                }
                // Numeric brackets index arrays; everything else is a key.
                match inner.parse::<usize>() {
                    Ok(index) => segments.push(PathSegment::Index(index)),
                    Err(_) => segments.push(PathSegment::Key(inner)),
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(PathSegment::Key(current));
    }

    segments
}
