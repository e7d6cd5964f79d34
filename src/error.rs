use thiserror::Error;

use crate::strategy::RequireMode;

pub const DEFAULT_CONVERT_MESSAGE: &str = "Invalid filter. Unable to convert.";

/// Errors that abort a conversion.
///
/// No partial document is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// A path segment contains a reserved character
    #[error("Invalid target encountered: {pointer}")]
    InvalidTarget { pointer: String },

    /// A referenced field is on the deny-list
    #[error("Denied field encountered: {0}")]
    DeniedField(String),

    /// A referenced field is missing from the allow-list
    #[error("Non-allowed field encountered: {0}")]
    UnallowedField(String),

    /// The referenced fields do not satisfy the required-field policy
    #[error("Missing required fields ({mode}): {}", format_fields(.fields))]
    RequiredField {
        fields: Vec<String>,
        mode: RequireMode,
    },

    /// Unrecognized operator or malformed clause shape
    #[error("{0}")]
    Conversion(String),

    /// A deliberate scope limitation of the translator
    #[error("{0}")]
    Unsupported(String),
}

impl ConvertError {
    pub fn unknown_operator(token: &str) -> Self {
        ConvertError::Conversion(format!("Unknown operator: {}", token))
    }

    pub fn malformed(detail: impl AsRef<str>) -> Self {
        ConvertError::Conversion(format!("{} {}", DEFAULT_CONVERT_MESSAGE, detail.as_ref()))
    }

    /// The offending field identifiers carried by a policy violation.
    pub fn data(&self) -> Option<Vec<&str>> {
        match self {
            ConvertError::DeniedField(field) | ConvertError::UnallowedField(field) => {
                Some(vec![field.as_str()])
            }
            ConvertError::RequiredField { fields, .. } => {
                Some(fields.iter().map(String::as_str).collect())
            }
            _ => None,
        }
    }

    pub fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            ConvertError::DeniedField(_)
                | ConvertError::UnallowedField(_)
                | ConvertError::RequiredField { .. }
        )
    }
}

/// Errors raised while building a [`Strategy`](crate::Strategy).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("Argument \"options\" must be an object")]
    OptionsNotObject,

    #[error("Argument \"options.allow\" must be an array of strings")]
    AllowNotArray,

    #[error("Argument \"options.deny\" must be an array of strings")]
    DenyNotArray,

    #[error("Argument \"options\" cannot contain both allow and deny")]
    AllowAndDeny,

    #[error("Argument \"options.require\" must be an object")]
    RequireNotObject,

    #[error("Argument \"options.require.fields\" must be an array of strings")]
    RequireFieldsNotArray,

    #[error("Argument \"options.require.which\" must be \"any\" or \"all\"")]
    InvalidRequireMode,
}

pub type Result<T> = std::result::Result<T, ConvertError>;

fn format_fields(fields: &[String]) -> String {
    serde_json::to_string(fields).unwrap_or_else(|_| fields.join(", "))
}
