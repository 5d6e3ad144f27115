use crate::settings::error::SettingsError;
use model::execution::{keys, params::ParamSet};
use std::collections::{BTreeMap, HashMap};

/// Host-supplied configuration, looked up one key at a time.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;

    /// The value for `key`, or the empty string when unset.
    fn value(&self, key: &str) -> String {
        self.get(key).unwrap_or_default()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl ConfigSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

/// Reads the bridge's configuration keys into an unvalidated [`ParamSet`].
///
/// Values are taken verbatim; [`validate`](crate::settings::validator::validate)
/// does the trimming and defaulting. A `query_frequency` that is present but
/// not an integer is rejected here since there is no sensible fallback for a
/// value the user explicitly set.
pub fn load_params(
    plugin_name: &str,
    config: &impl ConfigSource,
) -> Result<ParamSet, SettingsError> {
    let mut params = ParamSet {
        plugin_name: plugin_name.to_string(),
        instance_name: config.value(keys::PLUGIN_INSTANCE_ID),
        host: config.value(keys::DB_HOST),
        port: config.value(keys::DB_PORT),
        user: config.value(keys::DB_USER),
        password: config.value(keys::DB_PASSWORD),
        ssl_mode: config.value(keys::DB_SSL_MODE).trim().to_string(),
        sequencer_column: config.value(keys::ORDERING_COL),
        table_name: config.value(keys::TABLE_NAME),
        db_name: config.value(keys::DB_NAME),
        db_type: config.value(keys::DB_TYPE),
        primary_key_column: config.value(keys::PK),
        columns_csv: config.value(keys::QUERY_COLS),
        where_expression: config.value(keys::WHERE_EXPRESSION),
        delete_after_read: parse_flag(&config.value(keys::DELETE)),
        ..Default::default()
    };

    let frequency = config.value(keys::QUERY_FREQUENCY);
    let frequency = frequency.trim();
    if !frequency.is_empty() {
        params.query_frequency_secs =
            frequency
                .parse::<i64>()
                .map_err(|_| SettingsError::InvalidFormat {
                    field: keys::QUERY_FREQUENCY,
                    plugin: plugin_name.to_string(),
                    value: frequency.to_string(),
                })?;
    }

    Ok(params)
}

/// Boolean switches are on when their text contains `true`, ignoring case.
pub fn parse_flag(value: &str) -> bool {
    value.to_lowercase().contains("true")
}
