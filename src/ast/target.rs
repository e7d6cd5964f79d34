use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// A segment in a field path.
///
/// # Examples
/// - `/name` → `[Field("name")]`
/// - `/items/0/price` → `[Field("items"), Index(0), Field("price")]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object field access by name
    Field(String),

    /// Array element access by position
    Index(i64),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<i64> for PathSegment {
    fn from(n: i64) -> Self {
        PathSegment::Index(n)
    }
}

/// A reference to a field, possibly nested, within a stored document.
///
/// `field` identifies the top-level field as a JSON pointer (`/bar` for the
/// path `bar/0`); it is the identifier field policies are written against.
/// The path is never empty.
///
/// # Examples
///
/// ```
/// use filterdoc::ast::Target;
///
/// let target = Target::new(vec!["bar".into(), 0.into()]).unwrap();
/// assert_eq!(target.field(), "/bar");
/// assert_eq!(target.to_json_pointer(), "/bar/0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<PathSegment>", into = "Vec<PathSegment>")]
pub struct Target {
    field: String,
    path: Vec<PathSegment>,
}

impl Target {
    pub fn new(path: Vec<PathSegment>) -> Result<Self, ConvertError> {
        let first = path.first().ok_or_else(|| {
            ConvertError::Conversion("Target path must contain at least one segment".to_string())
        })?;

        Ok(Target {
            field: format!("/{}", escape_pointer(&first.to_string())),
            path,
        })
    }

    /// Shorthand for a target made only of named segments.
    pub fn from_fields<I, S>(names: I) -> Result<Self, ConvertError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Target::new(
            names
                .into_iter()
                .map(|n| PathSegment::Field(n.into()))
                .collect(),
        )
    }

    /// JSON pointer of the top-level field.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// JSON pointer of the full path, e.g. `/foo/bar/0`.
    pub fn to_json_pointer(&self) -> String {
        self.path
            .iter()
            .map(|segment| format!("/{}", escape_pointer(&segment.to_string())))
            .collect()
    }
}

impl TryFrom<Vec<PathSegment>> for Target {
    type Error = ConvertError;

    fn try_from(path: Vec<PathSegment>) -> Result<Self, Self::Error> {
        Target::new(path)
    }
}

impl From<Target> for Vec<PathSegment> {
    fn from(target: Target) -> Self {
        target.path
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_pointer())
    }
}

fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}
