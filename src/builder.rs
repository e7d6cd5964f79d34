use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    ast::{Conjunction, Filter, StatementValue},
    error::ConvertError,
    path::PathResolver,
    strategy::Strategy,
    translate,
    value::{Document, Value, single},
};

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Top-level fields referenced by the filter, deduplicated, in the order
    /// they were first seen
    pub fields: Vec<String>,

    /// The query document
    pub document: Document,
}

/// Walks a filter and assembles its query document.
///
/// Builders are single-use: each conversion gets its own field set.
pub struct TreeBuilder<'s> {
    resolver: PathResolver<'s>,
}

impl<'s> TreeBuilder<'s> {
    pub fn new(strategy: &'s Strategy) -> Self {
        TreeBuilder {
            resolver: PathResolver::new(strategy),
        }
    }

    /// Build the document for one filter (and, recursively, its groups).
    ///
    /// Consecutive `and` members are collected together; every `or` closes
    /// the current group. A group of one is emitted as its only member.
    pub fn build(&mut self, filter: &Filter) -> Result<Document, ConvertError> {
        let mut any_of: Vec<Value> = Vec::new();
        let mut all_of: Vec<Document> = Vec::new();

        for (i, statement) in filter.statements.iter().enumerate() {
            if i > 0 && statement.conjunctive == Conjunction::Or {
                any_of.push(Value::Object(collapse(std::mem::take(&mut all_of))));
            }

            let fragment = match &statement.value {
                StatementValue::Filter(group) => self.build(group)?,
                StatementValue::Clause(clause) => translate::translate(clause, &mut self.resolver)?,
            };

            all_of.push(fragment);
        }

        if any_of.is_empty() {
            return Ok(collapse(all_of));
        }

        any_of.push(Value::Object(collapse(all_of)));
        Ok(single("$or", Value::Array(any_of)))
    }

    /// Check required fields and hand back the result.
    pub fn finish(self, document: Document) -> Result<ConversionResult, ConvertError> {
        self.resolver
            .strategy()
            .assert_required(self.resolver.fields())?;

        Ok(ConversionResult {
            fields: self.resolver.into_fields(),
            document,
        })
    }
}

/// `[a]` becomes `a`; anything else becomes `{"$and": [...]}`.
fn collapse(mut all_of: Vec<Document>) -> Document {
    if all_of.len() == 1 {
        if let Some(only) = all_of.pop() {
            return only;
        }
    }

    single(
        "$and",
        Value::Array(all_of.into_iter().map(Value::Object).collect()),
    )
}

/// Convert a filter using no field restrictions.
///
/// # Examples
///
/// ```
/// use filterdoc::{Clause, Filter, Operator, Target, Value, convert};
///
/// let foo = Target::from_fields(["foo"]).unwrap();
/// let filter = Filter::clause(Clause::new(foo, Operator::Eq, Value::Integer(42)));
///
/// let result = convert(&filter).unwrap();
/// assert_eq!(result.fields, vec!["/foo"]);
/// assert_eq!(result.document["foo"], Value::Integer(42));
/// ```
pub fn convert(filter: &Filter) -> Result<ConversionResult, ConvertError> {
    convert_with(filter, &Strategy::UNRESTRICTED)
}

/// Convert a filter under the given field-access strategy.
pub fn convert_with(filter: &Filter, strategy: &Strategy) -> Result<ConversionResult, ConvertError> {
    let mut builder = TreeBuilder::new(strategy);
    let document = builder.build(filter)?;
    let result = builder.finish(document)?;

    debug!(fields = result.fields.len(), "filter converted");
    Ok(result)
}
