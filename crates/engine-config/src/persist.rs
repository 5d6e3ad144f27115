//! Saves a validated configuration into the instance store so later
//! invocations of the same instance can pick it up without re-reading the
//! host configuration.

use crate::settings::{error::SettingsError, loader::parse_flag};
use engine_core::state::KeyValueStore;
use model::execution::{
    keys::{self, scoped},
    params::{DEFAULT_QUERY_FREQUENCY, ParamSet},
};
use tracing::{debug, warn};

/// The store keys a configuration is spread over, with their values.
fn fields(params: &ParamSet) -> [(&'static str, String); 16] {
    [
        (keys::PLUGIN_INSTANCE_ID, params.instance_name.clone()),
        (keys::DB_HOST, params.host.clone()),
        (keys::DB_PORT, params.port.clone()),
        (keys::DB_USER, params.user.clone()),
        (keys::DB_PASSWORD, params.password.clone()),
        (keys::DB_SSL_MODE, params.ssl_mode.clone()),
        (keys::ORDERING_COL, params.sequencer_column.clone()),
        (keys::TABLE_NAME, params.table_name.clone()),
        (keys::DB_NAME, params.db_name.clone()),
        (keys::DB_TYPE, params.db_type.clone()),
        (keys::PK, params.primary_key_column.clone()),
        (keys::QUERY_FREQUENCY, params.query_frequency_secs.to_string()),
        (keys::DELETE, params.delete_after_read.to_string()),
        (keys::QUERY_COLS, params.columns_csv.clone()),
        (keys::WHERE_EXPRESSION, params.where_expression.clone()),
        (keys::LATEST_SEQUENCER_ID, params.latest_sequencer_value.clone()),
    ]
}

/// Writes every field of `params` under `<plugin>_<key>`.
pub async fn save_params(
    store: &dyn KeyValueStore,
    params: &ParamSet,
) -> Result<(), SettingsError> {
    for (key, value) in fields(params) {
        store.set(&scoped(&params.plugin_name, key), &value).await?;
    }
    debug!("{} Parameters saved", params.label());
    Ok(())
}

/// Reads back what [`save_params`] wrote for `plugin_name`.
///
/// A missing frequency becomes the default; one that does not parse is logged
/// and also defaulted, since the instance was already validated when saved.
pub async fn restore_params(
    store: &dyn KeyValueStore,
    plugin_name: &str,
) -> Result<ParamSet, SettingsError> {
    let get = |key: &'static str| {
        let key = scoped(plugin_name, key);
        async move { store.get(&key).await }
    };

    let mut params = ParamSet {
        plugin_name: plugin_name.to_string(),
        instance_name: get(keys::PLUGIN_INSTANCE_ID).await?,
        host: get(keys::DB_HOST).await?,
        port: get(keys::DB_PORT).await?,
        user: get(keys::DB_USER).await?,
        password: get(keys::DB_PASSWORD).await?,
        ssl_mode: get(keys::DB_SSL_MODE).await?,
        sequencer_column: get(keys::ORDERING_COL).await?,
        table_name: get(keys::TABLE_NAME).await?,
        db_name: get(keys::DB_NAME).await?,
        db_type: get(keys::DB_TYPE).await?,
        primary_key_column: get(keys::PK).await?,
        columns_csv: get(keys::QUERY_COLS).await?,
        where_expression: get(keys::WHERE_EXPRESSION).await?,
        latest_sequencer_value: get(keys::LATEST_SEQUENCER_ID).await?,
        delete_after_read: parse_flag(get(keys::DELETE).await?.trim()),
        query_frequency_secs: DEFAULT_QUERY_FREQUENCY,
    };

    let frequency = get(keys::QUERY_FREQUENCY).await?;
    let frequency = frequency.trim();
    if !frequency.is_empty() {
        match frequency.parse::<i64>() {
            Ok(secs) if secs > 0 => params.query_frequency_secs = secs,
            Ok(_) => {}
            Err(e) => warn!(
                "{} Stored {} '{}' is not numeric, using {}: {}",
                params.label(),
                keys::QUERY_FREQUENCY,
                frequency,
                DEFAULT_QUERY_FREQUENCY,
                e
            ),
        }
    }

    Ok(params)
}

/// Blanks every stored key of `plugin_name`.
pub async fn clear_params(
    store: &dyn KeyValueStore,
    plugin_name: &str,
) -> Result<(), SettingsError> {
    let blank = ParamSet {
        plugin_name: plugin_name.to_string(),
        ..Default::default()
    };
    for (key, _) in fields(&blank) {
        store.set(&scoped(plugin_name, key), "").await?;
    }
    debug!("[{}] Parameters cleared", plugin_name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::state::memory::MemoryStore;

    fn params() -> ParamSet {
        ParamSet {
            plugin_name: "in_gdb".into(),
            instance_name: "orders".into(),
            host: "db".into(),
            port: "5432".into(),
            user: "app".into(),
            password: "pw".into(),
            db_name: "shop".into(),
            db_type: "postgres".into(),
            table_name: "orders".into(),
            columns_csv: "*".into(),
            sequencer_column: "id".into(),
            primary_key_column: "id".into(),
            where_expression: "total > 0".into(),
            delete_after_read: true,
            query_frequency_secs: 7,
            latest_sequencer_value: "12".into(),
            ssl_mode: "require".into(),
        }
    }

    #[tokio::test]
    async fn test_save_then_restore() {
        let store = MemoryStore::new();
        save_params(&store, &params()).await.unwrap();

        assert_eq!(store.get("in_gdb_db_host").await.unwrap(), "db");
        assert_eq!(store.get("in_gdb_LstSeqId").await.unwrap(), "12");
        assert_eq!(store.get("in_gdb_delete").await.unwrap(), "true");

        let restored = restore_params(&store, "in_gdb").await.unwrap();
        assert_eq!(restored, params());
    }

    #[tokio::test]
    async fn test_instances_do_not_collide() {
        let store = MemoryStore::new();
        let mut other = params();
        other.plugin_name = "out_gdb".into();
        other.host = "elsewhere".into();

        save_params(&store, &params()).await.unwrap();
        save_params(&store, &other).await.unwrap();

        assert_eq!(restore_params(&store, "in_gdb").await.unwrap().host, "db");
        assert_eq!(
            restore_params(&store, "out_gdb").await.unwrap().host,
            "elsewhere"
        );
    }

    #[tokio::test]
    async fn test_restore_defaults_frequency() {
        let store = MemoryStore::new();
        let restored = restore_params(&store, "in_gdb").await.unwrap();
        assert_eq!(restored.query_frequency_secs, 1);
        assert!(!restored.delete_after_read);

        store.set("in_gdb_query_frequency", "often").await.unwrap();
        let restored = restore_params(&store, "in_gdb").await.unwrap();
        assert_eq!(restored.query_frequency_secs, 1);
    }

    #[tokio::test]
    async fn test_clear_blanks_everything() {
        let store = MemoryStore::new();
        save_params(&store, &params()).await.unwrap();
        clear_params(&store, "in_gdb").await.unwrap();

        assert_eq!(store.get("in_gdb_db_password").await.unwrap(), "");
        assert_eq!(store.get("in_gdb_LstSeqId").await.unwrap(), "");

        let restored = restore_params(&store, "in_gdb").await.unwrap();
        assert_eq!(restored.host, "");
        assert_eq!(restored.latest_sequencer_value, "");
    }
}
