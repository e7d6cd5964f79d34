use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer, ser::Error as _, ser::SerializeMap};

use crate::error::ConvertError;

/// A query document: the mapping produced for every fragment of a filter.
///
/// Keys are ordered so two equal documents always print identically.
pub type Document = BTreeMap<String, Value>;

/// A value appearing in a filter literal or in a produced query document.
///
/// Integers and floats are kept apart (unlike plain JSON, which only has
/// "number") so that `42` comes back out as `42` and not `42.0`.
///
/// # Examples
///
/// ```
/// use filterdoc::Value;
///
/// let answer = Value::Integer(42);
/// let tags = Value::Array(vec![Value::from("a"), Value::from("b")]);
///
/// assert_eq!(answer.type_name(), "integer");
/// assert_eq!(tags.type_name(), "array");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Array of values
    Array(Vec<Value>),

    /// Nested document
    Object(Document),

    /// Compiled match pattern, only ever produced by `like`/`nlike`
    Regex(RegexValue),
}

/// Regular expression in the document store's wire form: a source string
/// plus single-letter option flags.
///
/// Serializes as extended JSON:
/// `{"$regularExpression": {"pattern": "^a.*$", "options": "i"}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexValue {
    pub source: String,
    pub options: String,
}

impl RegexValue {
    pub fn new(source: impl Into<String>, options: impl Into<String>) -> Self {
        RegexValue {
            source: source.into(),
            options: options.into(),
        }
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.options.contains('i')
    }

    /// Test a candidate string against this expression, honoring the
    /// case-insensitive flag.
    pub fn is_match(&self, candidate: &str) -> bool {
        regex::RegexBuilder::new(&self.source)
            .case_insensitive(self.is_case_insensitive())
            .build()
            .map(|re| re.is_match(candidate))
            .unwrap_or(false)
    }
}

impl Value {
    /// Returns a human-readable type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Regex(_) => "regex",
        }
    }

    /// Get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value may be embedded in a query as a constant: a
    /// finite scalar, null, or an array of such values. Documents and
    /// regexes are query syntax, not data.
    pub fn is_plain(&self) -> bool {
        match self {
            Value::Float(n) => n.is_finite(),
            Value::Array(items) => items.iter().all(Value::is_plain),
            Value::Object(_) | Value::Regex(_) => false,
            Value::Null | Value::Boolean(_) | Value::Integer(_) | Value::String(_) => true,
        }
    }

    /// Wrap a single `key: value` pair into a document value.
    pub fn single(key: impl Into<String>, value: Value) -> Value {
        Value::Object(single(key, value))
    }
}

/// Build a one-entry document.
pub fn single(key: impl Into<String>, value: Value) -> Document {
    let mut doc = Document::new();
    doc.insert(key.into(), value);
    doc
}

/// Integers beyond `i64` are rejected rather than rounded into a float.
impl TryFrom<serde_json::Value> for Value {
    type Error = ConvertError;

    fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
        Ok(match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if n.is_u64() {
                    return Err(ConvertError::malformed(format!(
                        "Integer {} is out of range",
                        n
                    )));
                } else {
                    n.as_f64()
                        .map(Value::Float)
                        .ok_or_else(|| ConvertError::malformed(format!("Unrepresentable number {}", n)))?
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => Value::Array(
                arr.into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            serde_json::Value::Object(obj) => Value::Object(
                obj.into_iter()
                    .map(|(k, v)| Ok((k, Value::try_from(v)?)))
                    .collect::<Result<_, ConvertError>>()?,
            ),
        })
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(n) if n.is_finite() => serializer.serialize_f64(*n),
            Value::Float(n) => Err(S::Error::custom(format!("non-finite number {}", n))),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => arr.serialize(serializer),
            Value::Object(obj) => obj.serialize(serializer),
            Value::Regex(re) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$regularExpression", &RegexBody(re))?;
                map.end()
            }
        }
    }
}

struct RegexBody<'a>(&'a RegexValue);

impl Serialize for RegexBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("pattern", &self.0.source)?;
        map.serialize_entry("options", &self.0.options)?;
        map.end()
    }
}
