use serde::{Deserialize, Serialize};

use crate::{
    ast::{Operator, Target},
    value::Value,
};

/// Inclusive bounds for `between` / `nbetween`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub lower: Value,
    pub upper: Value,
}

impl Range {
    pub fn new(lower: impl Into<Value>, upper: impl Into<Value>) -> Self {
        Range {
            lower: lower.into(),
            upper: upper.into(),
        }
    }
}

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operand {
    /// Field reference (`/foo/bar`)
    Target(Target),

    /// Constant embedded in the expression (`42`, `"abc"`, `[1, 2]`)
    Literal(Value),

    /// Range bounds, only meaningful as the object of `between`/`nbetween`
    Range(Range),
}

impl From<Target> for Operand {
    fn from(target: Target) -> Self {
        Operand::Target(target)
    }
}

impl From<Range> for Operand {
    fn from(range: Range) -> Self {
        Operand::Range(range)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Literal(value)
    }
}

/// An atomic comparison between a subject and an object.
///
/// # Example
/// ```text
/// /price gte 100
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub subject: Operand,
    pub operator: Operator,
    pub object: Operand,
}

impl Clause {
    pub fn new(subject: impl Into<Operand>, operator: Operator, object: impl Into<Operand>) -> Self {
        Clause {
            subject: subject.into(),
            operator,
            object: object.into(),
        }
    }
}
