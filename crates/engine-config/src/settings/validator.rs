use crate::settings::error::SettingsError;
use model::execution::{
    keys,
    params::{DEFAULT_QUERY_FREQUENCY, ParamSet, WILDCARD_COLUMNS},
};
use tracing::{debug, info};

/// Normalizes and checks a configuration before any query is built from it.
///
/// Trims the connection fields, fills defaults for the column list, query
/// frequency and plugin name, and rejects configurations that cannot reach a
/// database. Running it on its own output is a no-op.
pub fn validate(mut params: ParamSet) -> Result<ParamSet, SettingsError> {
    if params.plugin_name.is_empty() {
        debug!("Defaulting plugin name to {}", keys::DEFAULT_PLUGIN_NAME);
        params.plugin_name = keys::DEFAULT_PLUGIN_NAME.to_string();
    }
    let plugin = params.plugin_name.clone();

    params.host = required(&params.host, keys::DB_HOST, &plugin)?;
    params.port = required(&params.port, keys::DB_PORT, &plugin)?;
    if params.port.parse::<u16>().is_err() {
        return Err(SettingsError::InvalidFormat {
            field: keys::DB_PORT,
            plugin,
            value: params.port,
        });
    }
    params.user = required(&params.user, keys::DB_USER, &plugin)?;
    params.db_name = required(&params.db_name, keys::DB_NAME, &plugin)?;

    params.columns_csv = params.columns_csv.trim().to_string();
    if params.columns_csv.is_empty() {
        params.columns_csv = WILDCARD_COLUMNS.to_string();
        info!("[{plugin}] Defaulting query columns to {WILDCARD_COLUMNS}");
    }

    params.db_type = required(&params.db_type, keys::DB_TYPE, &plugin)?;
    if params.dialect().is_none() {
        return Err(SettingsError::UnsupportedDialect {
            db_type: params.db_type,
            plugin,
        });
    }

    if params.query_frequency_secs <= 0 {
        params.query_frequency_secs = DEFAULT_QUERY_FREQUENCY;
    }

    Ok(params)
}

fn required(value: &str, field: &'static str, plugin: &str) -> Result<String, SettingsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SettingsError::MissingField {
            field,
            plugin: plugin.to_string(),
        });
    }
    Ok(trimmed.to_string())
}
