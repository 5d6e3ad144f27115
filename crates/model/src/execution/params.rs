use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const WILDCARD_COLUMNS: &str = "*";
pub const DEFAULT_QUERY_FREQUENCY: i64 = 1;
pub const DEFAULT_SSL_MODE: &str = "disable";

/// SQL dialects the bridge can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    Postgres,
    MySql,
}

impl DbType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbType::Postgres => "postgres",
            DbType::MySql => "mysql",
        }
    }
}

impl FromStr for DbType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postgres" => Ok(DbType::Postgres),
            "mysql" => Ok(DbType::MySql),
            other => Err(format!("Unknown db type: {other}")),
        }
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

/// Canonical configuration of one bridge instance.
///
/// Fields stay textual as supplied by the host until validation; `db_type` in
/// particular is kept as a string so an unknown dialect can be reported rather
/// than rejected at parse time. The serialized form is the flush context handed
/// between load-mode invocations, hence the terse field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSet {
    #[serde(rename = "pgnname", default, skip_serializing_if = "String::is_empty")]
    pub plugin_name: String,
    #[serde(rename = "instNme", default, skip_serializing_if = "String::is_empty")]
    pub instance_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub port: String,
    #[serde(rename = "usr", default, skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(rename = "pw", default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(rename = "dbnme", default, skip_serializing_if = "String::is_empty")]
    pub db_name: String,
    #[serde(rename = "cols", default, skip_serializing_if = "String::is_empty")]
    pub columns_csv: String,
    #[serde(rename = "seqr", default, skip_serializing_if = "String::is_empty")]
    pub sequencer_column: String,
    #[serde(rename = "tbl", default, skip_serializing_if = "String::is_empty")]
    pub table_name: String,
    #[serde(rename = "where", default, skip_serializing_if = "String::is_empty")]
    pub where_expression: String,
    #[serde(rename = "del", default, skip_serializing_if = "is_false")]
    pub delete_after_read: bool,
    #[serde(rename = "pk", default, skip_serializing_if = "String::is_empty")]
    pub primary_key_column: String,
    #[serde(rename = "dbtype", default, skip_serializing_if = "String::is_empty")]
    pub db_type: String,
    #[serde(rename = "ssl", default, skip_serializing_if = "String::is_empty")]
    pub ssl_mode: String,
    #[serde(rename = "freq", default, skip_serializing_if = "is_zero")]
    pub query_frequency_secs: i64,
    #[serde(rename = "seqrId", default, skip_serializing_if = "String::is_empty")]
    pub latest_sequencer_value: String,
}

impl ParamSet {
    /// The parsed dialect, if `db_type` names a known one.
    pub fn dialect(&self) -> Option<DbType> {
        self.db_type.parse().ok()
    }

    pub fn has_cursor(&self) -> bool {
        !self.latest_sequencer_value.is_empty()
    }

    /// True when the column list is `*` or unset.
    pub fn is_wildcard(&self) -> bool {
        let columns = self.columns_csv.trim();
        columns.is_empty() || columns == WILDCARD_COLUMNS
    }

    /// Idle delay in seconds, never below one.
    pub fn idle_secs(&self) -> u64 {
        self.query_frequency_secs.max(DEFAULT_QUERY_FREQUENCY) as u64
    }

    /// `[plugin]instance` prefix used in log lines.
    pub fn label(&self) -> String {
        format!("[{}]{}", self.plugin_name, self.instance_name)
    }

    /// A copy safe to log: the password is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.password.is_empty() {
            copy.password = "****".to_string();
        }
        copy
    }
}
