//! Compiles `like` match patterns into anchored, case-insensitive regular
//! expressions.
//!
//! | pattern | matches |
//! |---|---|
//! | `*` | any run of characters, including none |
//! | `_` | exactly one character |
//! | `\x` | the character `x` itself |
//!
//! Every other character matches itself.
//!
//! # Examples
//!
//! ```
//! use filterdoc::pattern::compile;
//!
//! let re = compile("*Bar_").unwrap();
//! assert_eq!(re.source, "^.*Bar.{1}$");
//! assert_eq!(re.options, "i");
//! assert!(re.is_match("foobarZ"));
//! ```

use crate::{error::ConvertError, value::RegexValue};

pub const CASE_INSENSITIVE: &str = "i";

pub fn compile(pattern: &str) -> Result<RegexValue, ConvertError> {
    let mut source = String::from("^");
    let mut literal = String::new();
    let mut chars = pattern.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(escaped) => literal.push(escaped),
                None => literal.push('\\'),
            },
            '*' | '_' => {
                flush_literal(&mut source, &mut literal);
                source.push_str(if ch == '*' { ".*" } else { ".{1}" });
            }
            c => literal.push(c),
        }
    }

    flush_literal(&mut source, &mut literal);
    source.push('$');

    regex::RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .map_err(|e| ConvertError::malformed(format!("Invalid match pattern {:?}: {}", pattern, e)))?;

    Ok(RegexValue::new(source, CASE_INSENSITIVE))
}

fn flush_literal(source: &mut String, literal: &mut String) {
    if !literal.is_empty() {
        source.push_str(&regex::escape(literal));
        literal.clear();
    }
}
