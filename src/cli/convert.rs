//! Convert JSON-encoded filters into query documents

use std::fs;

use tracing::info;

use super::CliError;
use crate::{ConversionResult, Filter, Strategy, convert_with};

/// Options for the convert command
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// The filter tree, JSON encoded
    pub filter: Option<String>,
    /// Strategy options: inline JSON, or `@path` to read them from a file
    pub strategy: Option<String>,
}

/// Load a strategy from inline JSON or an `@path` reference.
pub fn load_strategy(spec: Option<&str>) -> Result<Strategy, CliError> {
    let Some(spec) = spec else {
        return Ok(Strategy::default());
    };

    let text = match spec.strip_prefix('@') {
        Some(path) => {
            info!(path, "loading strategy file");
            fs::read_to_string(path)?
        }
        None => spec.to_string(),
    };

    let options: serde_json::Value = serde_json::from_str(&text)?;
    Ok(Strategy::from_json(&options)?)
}

/// Execute a filterdoc convert operation
pub fn execute_convert(options: &ConvertOptions) -> Result<ConversionResult, CliError> {
    let json = options.filter.as_ref().ok_or(CliError::NoInput)?;

    let filter: Filter = serde_json::from_str(json)?;
    let strategy = load_strategy(options.strategy.as_deref())?;

    Ok(convert_with(&filter, &strategy)?)
}
