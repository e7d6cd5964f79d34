use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison operators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    /// Equal (`eq`)
    Eq,
    /// Not equal (`neq`)
    Neq,
    /// Greater than (`gt`)
    Gt,
    /// Greater than or equal (`gte`)
    Gte,
    /// Less than (`lt`)
    Lt,
    /// Less than or equal (`lte`)
    Lte,

    // Pattern matching
    /// Case-insensitive wildcard match (`like`)
    Like,
    /// Negated wildcard match (`nlike`)
    Nlike,

    // Ranges
    /// Inclusive range (`between`)
    Between,
    /// Outside an inclusive range (`nbetween`)
    Nbetween,

    // Membership
    /// Member of a list (`in`)
    In,
    /// Not a member of a list (`nin`)
    Nin,

    /// Operator token this engine does not recognize.
    ///
    /// Kept so the token can be named when conversion rejects it.
    Other(String),
}

impl Operator {
    /// The operator token as written in a filter expression.
    pub fn token(&self) -> &str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Like => "like",
            Operator::Nlike => "nlike",
            Operator::Between => "between",
            Operator::Nbetween => "nbetween",
            Operator::In => "in",
            Operator::Nin => "nin",
            Operator::Other(token) => token,
        }
    }

    /// The operator seen from the other side of the comparison.
    ///
    /// `42 gt /foo` reads as `/foo lt 42`. Operators that do not depend on
    /// operand order come back unchanged.
    pub fn mirrored(&self) -> Operator {
        match self {
            Operator::Gt => Operator::Lt,
            Operator::Gte => Operator::Lte,
            Operator::Lt => Operator::Gt,
            Operator::Lte => Operator::Gte,
            other => other.clone(),
        }
    }
}

impl From<&str> for Operator {
    fn from(token: &str) -> Self {
        match token {
            "eq" => Operator::Eq,
            "neq" => Operator::Neq,
            "gt" => Operator::Gt,
            "gte" => Operator::Gte,
            "lt" => Operator::Lt,
            "lte" => Operator::Lte,
            "like" => Operator::Like,
            "nlike" => Operator::Nlike,
            "between" => Operator::Between,
            "nbetween" => Operator::Nbetween,
            "in" => Operator::In,
            "nin" => Operator::Nin,
            other => Operator::Other(other.to_string()),
        }
    }
}

impl From<String> for Operator {
    fn from(token: String) -> Self {
        Operator::from(token.as_str())
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.token().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
