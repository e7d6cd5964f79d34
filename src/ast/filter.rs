use serde::{Deserialize, Serialize};

use crate::ast::Clause;

/// How a statement joins the statements before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conjunction {
    /// Logical AND (`and`)
    #[default]
    And,
    /// Logical OR (`or`)
    Or,
}

/// What a statement holds: a single clause or a parenthesized group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementValue {
    Clause(Clause),
    Filter(Filter),
}

/// One entry in a filter's statement list.
///
/// The conjunction of the first statement in a list is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(default)]
    pub conjunctive: Conjunction,
    pub value: StatementValue,
}

/// A boolean filter: an ordered list of statements.
///
/// # Example
/// ```text
/// /foo eq 42 and /bar/0 lt 22 or /baz gt 2
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Filter {
    pub statements: Vec<Statement>,
}

impl Filter {
    /// Start a filter with a single clause.
    pub fn clause(clause: Clause) -> Self {
        Filter::default().push(Conjunction::And, StatementValue::Clause(clause))
    }

    /// Start a filter with a nested group.
    pub fn group(filter: Filter) -> Self {
        Filter::default().push(Conjunction::And, StatementValue::Filter(filter))
    }

    pub fn and(self, clause: Clause) -> Self {
        self.push(Conjunction::And, StatementValue::Clause(clause))
    }

    pub fn or(self, clause: Clause) -> Self {
        self.push(Conjunction::Or, StatementValue::Clause(clause))
    }

    pub fn and_group(self, filter: Filter) -> Self {
        self.push(Conjunction::And, StatementValue::Filter(filter))
    }

    pub fn or_group(self, filter: Filter) -> Self {
        self.push(Conjunction::Or, StatementValue::Filter(filter))
    }

    fn push(mut self, conjunctive: Conjunction, value: StatementValue) -> Self {
        self.statements.push(Statement { conjunctive, value });
        self
    }
}
