//! Documentation content for filterdoc CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Operators,
    Input,
    Strategy,
    Errors,
}

impl DocCategory {
    /// Parse category name from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "operators" | "ops" => Some(Self::Operators),
            "input" | "filter" | "ast" => Some(Self::Input),
            "strategy" | "policy" => Some(Self::Strategy),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"FILTERDOC DOCUMENTATION

filterdoc turns a boolean filter tree (clauses joined by and/or, possibly
nested) into a document-store query document, checking every referenced
field against an allow/deny policy on the way.

DOCUMENTATION CATEGORIES

  operators         Operator table for each operand shape
  input             JSON encoding of the filter tree
  strategy          Allow/deny lists and required fields
  errors            What makes a conversion fail

QUICK REFERENCE

  filterdoc convert '<filter json>'                 Convert a filter
  filterdoc convert --strategy @policy.json         Read the filter from stdin
  filterdoc doc operators                           Show one category
"#
}

/// Get documentation for a category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::parse(name) {
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Input) => Ok(INPUT_DOC),
        Some(DocCategory::Strategy) => Ok(STRATEGY_DOC),
        Some(DocCategory::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const OPERATORS_DOC: &str = r#"OPERATORS

FIELD VS LITERAL

  /foo eq 42              {"foo": 42}
  /foo neq 42             {"foo": {"$ne": 42}}
  /foo gt 42              {"foo": {"$gt": 42}}          (gte, lt, lte alike)
  /foo like "*Bar_"       {"foo": {"$regex": R}}
                          R = {"$regularExpression": {"pattern": "^.*Bar.{1}$", "options": "i"}}
  /foo nlike "*Bar_"      {"foo": {"$not": {"$regex": R}}}
  /foo between 0,42       {"$and": [{"foo": {"$gte": 0}}, {"foo": {"$lte": 42}}]}
  /foo nbetween 0,42      {"$or": [{"foo": {"$lt": 0}}, {"foo": {"$gt": 42}}]}
  /foo in [1,2]           {"foo": {"$in": [1, 2]}}
  /foo nin [1,2]          {"foo": {"$nin": [1, 2]}}

  A literal on the left is turned around: 42 gt /foo reads as /foo lt 42.

LIKE PATTERNS

  *                       any run of characters
  _                       exactly one character
  \x                      the character x itself
  Matching is anchored and case-insensitive.

FIELD VS FIELD

  /foo eq /bar            {"$expr": {"$eq": ["$foo", "$bar"]}}
  Only eq, neq, gt, gte, lt and lte are available.

LITERAL VS LITERAL

  42 eq 42                {"$expr": {"$eq": [42, 42]}}
  42 between 0,42         {"$expr": {"$and": [{"$gte": [42, 0]}, {"$lte": [42, 42]}]}}
  42 in [1,2,3]           {"$expr": {"$in": [42, [1, 2, 3]]}}
  42 nin [1,2,3]          {"$expr": {"$not": {"$in": [42, [1, 2, 3]]}}}
  like/nlike between two literals is unsupported.
"#;

const INPUT_DOC: &str = r#"INPUT

A filter is a list of statements. Each statement joins the ones before it
with "and" or "or" (the first one's conjunction is ignored) and holds either
a clause or a nested filter.

  {"statements": [
    {"conjunctive": "and",
     "value": {"clause": {"subject": {"target": ["foo", "bar", 0]},
                          "operator": "eq",
                          "object": {"literal": 42}}}},
    {"conjunctive": "or",
     "value": {"filter": {"statements": [...]}}}
  ]}

OPERANDS

  {"target": ["foo", 0]}                  field path, never empty
  {"literal": "abc"}                      scalar or array, never an object
  {"range": {"lower": 0, "upper": 42}}    between/nbetween only

GROUPING

  a and b or c and d      {"$or": [{"$and": [a, b]}, {"$and": [c, d]}]}
"#;

const STRATEGY_DOC: &str = r#"STRATEGY

  {"allow": ["/foo", "/bar"]}                       only these fields
  {"deny": ["/password"]}                           never these fields
  {"require": {"fields": ["/tenant"], "which": "all"}}

Fields are named by the JSON pointer of their first path segment: the
target ["bar", 0] belongs to the field "/bar".

allow and deny cannot both be non-empty. "which" is "any" (default) or "all".
"#;

const ERRORS_DOC: &str = r#"ERRORS

  Invalid target          a path segment contains one of
                          " { } $ ; , ( ) [ ] ' * < > # ~ @ & % ? : ` / \
                          or two consecutive hyphens
  Denied field            a field on the deny-list is referenced
  Non-allowed field       a field missing from the allow-list is referenced
  Missing required fields the required fields are not referenced
  Unknown operator        the operator is not valid for the operand shape
  Unsupported             like/nlike between two literals

Every error aborts the conversion; no partial document is produced.
"#;
