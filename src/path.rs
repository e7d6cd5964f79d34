use std::sync::LazyLock;

use regex::Regex;

use crate::{ast::Target, error::ConvertError, strategy::Strategy};

/// Characters that collide with document key syntax or with the `$`
/// reference namespace used by expression comparisons.
static RESERVED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["{}$;,()\[\]'*<>#~@&%?:`/\\]|-{2,}"#).expect("reserved-character pattern")
});

/// Returns true when a single path segment contains a reserved character.
pub fn is_reserved(segment: &str) -> bool {
    RESERVED.is_match(segment)
}

/// Turns targets into dotted document keys, enforcing the field policy and
/// recording each top-level field once, in first-seen order.
pub struct PathResolver<'s> {
    strategy: &'s Strategy,
    fields: Vec<String>,
}

impl<'s> PathResolver<'s> {
    pub fn new(strategy: &'s Strategy) -> Self {
        PathResolver {
            strategy,
            fields: Vec::new(),
        }
    }

    /// Resolve a target into its canonical key.
    ///
    /// # Examples
    ///
    /// ```
    /// use filterdoc::{Strategy, ast::Target, path::PathResolver};
    ///
    /// let strategy = Strategy::default();
    /// let mut resolver = PathResolver::new(&strategy);
    /// let target = Target::new(vec!["foo".into(), "bar".into(), 101.into()]).unwrap();
    ///
    /// assert_eq!(resolver.resolve(&target).unwrap(), "foo.bar.101");
    /// assert_eq!(resolver.fields(), ["/foo"]);
    /// ```
    pub fn resolve(&mut self, target: &Target) -> Result<String, ConvertError> {
        self.strategy.assert_allowed(target)?;

        let mut key = String::new();

        for segment in target.path() {
            let segment = segment.to_string();

            if is_reserved(&segment) {
                return Err(ConvertError::InvalidTarget {
                    pointer: target.to_json_pointer(),
                });
            }

            if !key.is_empty() {
                key.push('.');
            }
            key.push_str(&segment);
        }

        if !self.fields.iter().any(|f| f == target.field()) {
            self.fields.push(target.field().to_string());
        }

        Ok(key)
    }

    /// Resolve a target into an expression reference (`$foo.bar`).
    pub fn reference(&mut self, target: &Target) -> Result<String, ConvertError> {
        Ok(format!("${}", self.resolve(target)?))
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn strategy(&self) -> &'s Strategy {
        self.strategy
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}
