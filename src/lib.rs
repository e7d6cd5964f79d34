pub mod ast;
pub mod builder;
pub mod error;
pub mod path;
pub mod pattern;
pub mod strategy;
pub mod translate;
pub mod value;

pub mod cli;

pub use ast::{Clause, Conjunction, Filter, Operand, Operator, PathSegment, Range, Statement, StatementValue, Target};
pub use builder::{ConversionResult, TreeBuilder, convert, convert_with};
pub use error::{ConvertError, Result, StrategyError};
pub use strategy::{FieldList, RequireMode, RequireOptions, Strategy, StrategyOptions};
pub use value::{Document, RegexValue, Value};
