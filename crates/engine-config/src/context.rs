//! The JSON flush context handed from load-mode init to each flush, and a
//! printable summary of a configuration for the init log.

use crate::settings::error::SettingsError;
use model::execution::params::ParamSet;
use planner::query::{dialect::redacted_connection_string, generator::QueryGenerator};

pub fn params_to_json(params: &ParamSet) -> Result<String, SettingsError> {
    Ok(serde_json::to_string(params)?)
}

pub fn params_from_json(context: &str) -> Result<ParamSet, SettingsError> {
    Ok(serde_json::from_str(context)?)
}

/// `[plugin]{json},Connection:{dsn},Query:{select}` with the password masked
/// in both the JSON and the connection string.
pub fn describe(params: &ParamSet) -> Result<String, SettingsError> {
    let redacted = params.redacted();
    Ok(format!(
        "[{}]{},Connection:{{{}}},Query:{}",
        params.plugin_name,
        params_to_json(&redacted)?,
        redacted_connection_string(params),
        QueryGenerator::new(params).select(false)
    ))
}
