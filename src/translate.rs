//! Per-clause translation into query fragments.
//!
//! Every clause is first classified by the kinds of its two operands, then
//! translated with the table for that shape:
//!
//! | shape | example | fragment |
//! |---|---|---|
//! | field vs literal | `/foo gt 42` | `{"foo": {"$gt": 42}}` |
//! | field vs field | `/foo gt /bar` | `{"$expr": {"$gt": ["$foo", "$bar"]}}` |
//! | literal vs literal | `42 gt 41` | `{"$expr": {"$gt": [42, 41]}}` |
//!
//! A literal compared against a field (`42 lt /foo`) is turned around first
//! so the field is always the subject (`/foo gt 42`).

use tracing::trace;

use crate::{
    ast::{Clause, Operand, Operator, Range, Target},
    error::ConvertError,
    path::PathResolver,
    pattern,
    value::{Document, Value, single},
};

pub const EXPR: &str = "$expr";

const LIKE_LITERALS: &str = "Comparing literals to (n)like match expressions is unsupported";

/// The operand kinds of a clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<'a> {
    /// Exactly one side is a field. The field is always `target` and
    /// `operator` is oriented for it as the subject.
    FieldLiteral {
        target: &'a Target,
        operator: Operator,
        object: &'a Operand,
    },
    /// Both sides are fields.
    FieldField {
        subject: &'a Target,
        operator: Operator,
        object: &'a Target,
    },
    /// Neither side is a field.
    LiteralLiteral {
        subject: &'a Operand,
        operator: Operator,
        object: &'a Operand,
    },
}

/// Classify a clause by operand kinds, turning `literal <op> field` around
/// into `field <op'> literal`.
pub fn classify(clause: &Clause) -> Shape<'_> {
    match (&clause.subject, &clause.object) {
        (Operand::Target(subject), Operand::Target(object)) => Shape::FieldField {
            subject,
            operator: clause.operator.clone(),
            object,
        },
        (Operand::Target(target), object) => Shape::FieldLiteral {
            target,
            operator: clause.operator.clone(),
            object,
        },
        (subject, Operand::Target(target)) => Shape::FieldLiteral {
            target,
            operator: clause.operator.mirrored(),
            object: subject,
        },
        (subject, object) => Shape::LiteralLiteral {
            subject,
            operator: clause.operator.clone(),
            object,
        },
    }
}

/// Translate a single clause into a query fragment.
pub fn translate(clause: &Clause, resolver: &mut PathResolver<'_>) -> Result<Document, ConvertError> {
    let shape = classify(clause);
    trace!(?shape, "translating clause");

    match shape {
        Shape::FieldLiteral {
            target,
            operator,
            object,
        } => field_literal(target, &operator, object, resolver),
        Shape::FieldField {
            subject,
            operator,
            object,
        } => field_field(subject, &operator, object, resolver),
        Shape::LiteralLiteral {
            subject,
            operator,
            object,
        } => literal_literal(subject, &operator, object),
    }
}

fn field_literal(
    target: &Target,
    operator: &Operator,
    object: &Operand,
    resolver: &mut PathResolver<'_>,
) -> Result<Document, ConvertError> {
    if let Operator::Other(token) = operator {
        return Err(ConvertError::unknown_operator(token));
    }

    let field = resolver.resolve(target)?;

    let condition = |op: &str, value: Value| single(field.clone(), Value::single(op, value));

    let fragment = match operator {
        Operator::Eq => single(field.clone(), literal(object, operator)?),
        Operator::Neq => condition("$ne", literal(object, operator)?),
        Operator::Gt => condition("$gt", literal(object, operator)?),
        Operator::Gte => condition("$gte", literal(object, operator)?),
        Operator::Lt => condition("$lt", literal(object, operator)?),
        Operator::Lte => condition("$lte", literal(object, operator)?),
        Operator::Like => condition("$regex", regex(object, operator)?),
        Operator::Nlike => condition("$not", Value::single("$regex", regex(object, operator)?)),
        Operator::Between => {
            let Range { lower, upper } = range(object, operator)?;
            single(
                "$and",
                Value::Array(vec![
                    Value::Object(condition("$gte", lower.clone())),
                    Value::Object(condition("$lte", upper.clone())),
                ]),
            )
        }
        Operator::Nbetween => {
            let Range { lower, upper } = range(object, operator)?;
            single(
                "$or",
                Value::Array(vec![
                    Value::Object(condition("$lt", lower.clone())),
                    Value::Object(condition("$gt", upper.clone())),
                ]),
            )
        }
        Operator::In => condition("$in", literal(object, operator)?),
        Operator::Nin => condition("$nin", literal(object, operator)?),
        Operator::Other(token) => return Err(ConvertError::unknown_operator(token)),
    };

    Ok(fragment)
}

fn field_field(
    subject: &Target,
    operator: &Operator,
    object: &Target,
    resolver: &mut PathResolver<'_>,
) -> Result<Document, ConvertError> {
    let subject = resolver.reference(subject)?;
    let object = resolver.reference(object)?;

    // like/nlike, ranges and membership have no field-vs-field form.
    let op = comparison(operator).ok_or_else(|| ConvertError::unknown_operator(operator.token()))?;

    Ok(expression(Value::single(
        op,
        Value::Array(vec![Value::String(subject), Value::String(object)]),
    )))
}

fn literal_literal(
    subject: &Operand,
    operator: &Operator,
    object: &Operand,
) -> Result<Document, ConvertError> {
    let pair = |subject: &Value, object: &Value| Value::Array(vec![subject.clone(), object.clone()]);

    if let Some(op) = comparison(operator) {
        let subject = literal(subject, operator)?;
        let object = literal(object, operator)?;
        return Ok(expression(Value::single(op, pair(&subject, &object))));
    }

    match operator {
        Operator::Between | Operator::Nbetween => {
            let subject = literal(subject, operator)?;
            let Range { lower, upper } = range(object, operator)?;

            let (join, low, high) = if *operator == Operator::Between {
                ("$and", "$gte", "$lte")
            } else {
                ("$or", "$lt", "$gt")
            };

            Ok(expression(Value::single(
                join,
                Value::Array(vec![
                    Value::single(low, pair(&subject, lower)),
                    Value::single(high, pair(&subject, upper)),
                ]),
            )))
        }
        Operator::In => {
            let subject = literal(subject, operator)?;
            let object = literal(object, operator)?;
            Ok(expression(Value::single("$in", pair(&subject, &object))))
        }
        Operator::Nin => {
            let subject = literal(subject, operator)?;
            let object = literal(object, operator)?;
            Ok(expression(Value::single(
                "$not",
                Value::single("$in", pair(&subject, &object)),
            )))
        }
        Operator::Like | Operator::Nlike => Err(ConvertError::Unsupported(LIKE_LITERALS.to_string())),
        other => Err(ConvertError::unknown_operator(other.token())),
    }
}

/// Expression-dialect name of the six comparison operators.
fn comparison(operator: &Operator) -> Option<&'static str> {
    match operator {
        Operator::Eq => Some("$eq"),
        Operator::Neq => Some("$ne"),
        Operator::Gt => Some("$gt"),
        Operator::Gte => Some("$gte"),
        Operator::Lt => Some("$lt"),
        Operator::Lte => Some("$lte"),
        _ => None,
    }
}

fn expression(inner: Value) -> Document {
    single(EXPR, inner)
}

fn literal(operand: &Operand, operator: &Operator) -> Result<Value, ConvertError> {
    match operand {
        Operand::Literal(value) => constant(value, operator).cloned(),
        Operand::Range(_) => Err(ConvertError::malformed(format!(
            "Range operand is only valid with between/nbetween, not {}",
            operator
        ))),
        Operand::Target(target) => Err(ConvertError::malformed(format!(
            "Expected a literal operand for {}, found target {}",
            operator, target
        ))),
    }
}

fn range<'a>(operand: &'a Operand, operator: &Operator) -> Result<&'a Range, ConvertError> {
    match operand {
        Operand::Range(range) => {
            constant(&range.lower, operator)?;
            constant(&range.upper, operator)?;
            Ok(range)
        }
        _ => Err(ConvertError::malformed(format!(
            "{} requires a range operand",
            operator
        ))),
    }
}

/// Literals land verbatim in the output, so only plain data passes.
fn constant<'a>(value: &'a Value, operator: &Operator) -> Result<&'a Value, ConvertError> {
    if value.is_plain() {
        return Ok(value);
    }

    Err(ConvertError::malformed(format!(
        "Literal for {} must be a scalar or an array of scalars, found {}",
        operator,
        value.type_name()
    )))
}

fn regex(operand: &Operand, operator: &Operator) -> Result<Value, ConvertError> {
    match literal(operand, operator)? {
        Value::String(text) => Ok(Value::Regex(pattern::compile(&text)?)),
        other => Err(ConvertError::malformed(format!(
            "{} requires a string pattern, found {}",
            operator,
            other.type_name()
        ))),
    }
}
