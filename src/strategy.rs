//! Field-access policy applied while a filter is converted.
//!
//! A [`Strategy`] is built once and reused across conversions. It is never
//! mutated during a conversion, so a single instance can be shared between
//! threads freely.
//!
//! # Examples
//!
//! ```
//! use filterdoc::{RequireMode, Strategy, StrategyOptions};
//!
//! let strategy = Strategy::new(StrategyOptions {
//!     deny: Some(vec!["/password".to_string()]),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! assert!(strategy.is_deny_list());
//! assert_eq!(strategy.require_mode(), RequireMode::Any);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    ast::Target,
    error::{ConvertError, StrategyError},
};

/// How `required` fields must be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequireMode {
    /// At least one required field must be referenced
    #[default]
    Any,
    /// Every required field must be referenced
    All,
}

impl fmt::Display for RequireMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequireMode::Any => f.write_str("any"),
            RequireMode::All => f.write_str("all"),
        }
    }
}

impl std::str::FromStr for RequireMode {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(RequireMode::Any),
            "all" => Ok(RequireMode::All),
            _ => Err(StrategyError::InvalidRequireMode),
        }
    }
}

/// Allow- or deny-list of top-level field identifiers.
///
/// The two kinds are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldList {
    #[default]
    Unrestricted,
    Allow(Vec<String>),
    Deny(Vec<String>),
}

/// Required-field section of [`StrategyOptions`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequireOptions {
    #[serde(default)]
    pub fields: Option<Vec<String>>,
    #[serde(default)]
    pub which: Option<RequireMode>,
}

/// Caller-facing configuration used to build a [`Strategy`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StrategyOptions {
    #[serde(default)]
    pub allow: Option<Vec<String>>,
    #[serde(default)]
    pub deny: Option<Vec<String>>,
    #[serde(default)]
    pub require: Option<RequireOptions>,
}

/// Field-access policy: which fields a filter may reference and which it
/// must reference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Strategy {
    list: FieldList,
    required: Vec<String>,
    mode: RequireMode,
}

impl Strategy {
    /// No restrictions and no requirements. Used when the caller supplies no
    /// strategy of its own.
    pub const UNRESTRICTED: Strategy = Strategy {
        list: FieldList::Unrestricted,
        required: Vec::new(),
        mode: RequireMode::Any,
    };

    pub fn new(options: StrategyOptions) -> Result<Self, StrategyError> {
        let allow = options.allow.unwrap_or_default();
        let deny = options.deny.unwrap_or_default();

        let list = match (allow.is_empty(), deny.is_empty()) {
            (false, false) => return Err(StrategyError::AllowAndDeny),
            (false, true) => FieldList::Allow(allow),
            (true, false) => FieldList::Deny(deny),
            (true, true) => FieldList::Unrestricted,
        };

        let require = options.require.unwrap_or_default();

        Ok(Strategy {
            list,
            required: require.fields.unwrap_or_default(),
            mode: require.which.unwrap_or_default(),
        })
    }

    /// Build a strategy from untyped JSON, reporting exactly which key has
    /// the wrong shape.
    ///
    /// `null` stands for "no options" at every level.
    pub fn from_json(options: &serde_json::Value) -> Result<Self, StrategyError> {
        use serde_json::Value as Json;

        let opts = match options {
            Json::Null => return Ok(Strategy::default()),
            Json::Object(map) => map,
            _ => return Err(StrategyError::OptionsNotObject),
        };

        let allow = string_list(opts.get("allow"), StrategyError::AllowNotArray)?;
        let deny = string_list(opts.get("deny"), StrategyError::DenyNotArray)?;

        let require = match opts.get("require") {
            None | Some(Json::Null) => None,
            Some(Json::Object(req)) => {
                let fields = string_list(req.get("fields"), StrategyError::RequireFieldsNotArray)?;
                let which = match req.get("which") {
                    None | Some(Json::Null) => None,
                    Some(Json::String(s)) => Some(s.parse::<RequireMode>()?),
                    Some(_) => return Err(StrategyError::InvalidRequireMode),
                };
                Some(RequireOptions { fields, which })
            }
            Some(_) => return Err(StrategyError::RequireNotObject),
        };

        Strategy::new(StrategyOptions {
            allow,
            deny,
            require,
        })
    }

    pub fn field_list(&self) -> &FieldList {
        &self.list
    }

    pub fn is_deny_list(&self) -> bool {
        matches!(self.list, FieldList::Deny(_))
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required
    }

    pub fn require_mode(&self) -> RequireMode {
        self.mode
    }

    /// Check a referenced target against the allow- or deny-list.
    pub fn assert_allowed(&self, target: &Target) -> Result<(), ConvertError> {
        let field = target.field();

        match &self.list {
            FieldList::Unrestricted => Ok(()),
            FieldList::Deny(denied) if denied.iter().any(|f| f == field) => {
                debug!(field, "denied field referenced");
                Err(ConvertError::DeniedField(field.to_string()))
            }
            FieldList::Deny(_) => Ok(()),
            FieldList::Allow(allowed) if !allowed.iter().any(|f| f == field) => {
                debug!(field, "field outside allow-list referenced");
                Err(ConvertError::UnallowedField(field.to_string()))
            }
            FieldList::Allow(_) => Ok(()),
        }
    }

    /// Check the full set of referenced fields against the required fields.
    pub fn assert_required(&self, fields: &[String]) -> Result<(), ConvertError> {
        if self.required.is_empty() {
            return Ok(());
        }

        let met = match self.mode {
            RequireMode::All => self.required.iter().all(|r| fields.contains(r)),
            RequireMode::Any => self.required.iter().any(|r| fields.contains(r)),
        };

        if met {
            return Ok(());
        }

        debug!(mode = %self.mode, required = ?self.required, "required fields missing");
        Err(ConvertError::RequiredField {
            fields: self.required.clone(),
            mode: self.mode,
        })
    }
}

impl TryFrom<StrategyOptions> for Strategy {
    type Error = StrategyError;

    fn try_from(options: StrategyOptions) -> Result<Self, Self::Error> {
        Strategy::new(options)
    }
}

fn string_list(
    value: Option<&serde_json::Value>,
    err: StrategyError,
) -> Result<Option<Vec<String>>, StrategyError> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(|| err.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(err),
    }
}
