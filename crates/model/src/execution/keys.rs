//! Configuration keys recognised by the bridge, and the names under which a
//! validated configuration is persisted between invocations.

pub const PLUGIN_INSTANCE_ID: &str = "plugin_instance_id";
pub const DB_HOST: &str = "db_host";
pub const DB_PORT: &str = "db_port";
pub const DB_USER: &str = "db_user";
pub const DB_PASSWORD: &str = "db_password";
pub const DB_SSL_MODE: &str = "db_sslmode";
pub const ORDERING_COL: &str = "ordering_col";
pub const TABLE_NAME: &str = "table_name";
pub const DB_NAME: &str = "db_name";
pub const DB_TYPE: &str = "db_type";
pub const PK: &str = "pk";
pub const DELETE: &str = "delete";
pub const WHERE_EXPRESSION: &str = "where_expression";
pub const QUERY_COLS: &str = "query_cols";
pub const QUERY_FREQUENCY: &str = "query_frequency";
pub const LOG_LEVEL: &str = "log_level";

/// Cursor key; never read from configuration, only from the instance store.
pub const LATEST_SEQUENCER_ID: &str = "LstSeqId";

pub const DEFAULT_PLUGIN_NAME: &str = "gdb";

/// Store key for `key` scoped to `plugin_name`.
pub fn scoped(plugin_name: &str, key: &str) -> String {
    format!("{plugin_name}_{key}")
}
