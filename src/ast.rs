//! # Filter Expression - Abstract Syntax Tree
//!
//! This module defines the tree a filter-expression parser hands to the
//! translator. The translator only ever reads it; nothing here is mutated
//! during conversion.
//!
//! ## Architecture Overview
//!
//! - **[filter]** - The statement list and its `and`/`or` conjunctions
//! - **[clause]** - A single comparison and its operands
//! - **[target]** - References to (possibly nested) document fields
//! - **[operators]** - The closed set of comparison operators
//!
//! ## Shape
//!
//! ```text
//! /foo eq 42 and (/bar neq 24 or /baz gt 2)
//! ```
//!
//! is a [`Filter`] of two statements: a [`Clause`] and a nested [`Filter`]
//! joined with `and`. The nested group itself holds two clauses joined with
//! `or`.
//!
//! ## JSON Form
//!
//! Every node derives serde, so hosts without a native parser can hand the
//! tree over as JSON:
//!
//! ```text
//! {"statements": [
//!   {"conjunctive": "and",
//!    "value": {"clause": {"subject": {"target": ["foo"]},
//!                         "operator": "eq",
//!                         "object": {"literal": 42}}}}
//! ]}
//! ```
pub mod clause;
pub mod filter;
pub mod operators;
pub mod target;

pub use clause::{Clause, Operand, Range};
pub use filter::{Conjunction, Filter, Statement, StatementValue};
pub use operators::Operator;
pub use target::{PathSegment, Target};
