//! Defines the `Dialect` trait for database-specific connection syntax.

use model::execution::params::{DEFAULT_SSL_MODE, DbType, ParamSet};
use tracing::warn;
use url::Url;

pub trait Dialect: Send + Sync {
    /// Renders the driver connection string for `params`.
    ///
    /// - PostgreSQL uses libpq `key=value` pairs
    /// - MySQL uses a `mysql://` URL
    fn connection_string(&self, params: &ParamSet) -> String;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Postgres {
    /// Quotes a libpq keyword value when it is empty or contains whitespace,
    /// quotes or backslashes.
    fn kv_value(value: &str) -> String {
        let needs_quotes = value.is_empty()
            || value
                .chars()
                .any(|c| c.is_whitespace() || c == '\'' || c == '\\');
        if !needs_quotes {
            return value.to_string();
        }

        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for ch in value.chars() {
            if ch == '\'' || ch == '\\' {
                out.push('\\');
            }
            out.push(ch);
        }
        out.push('\'');
        out
    }
}

impl Dialect for Postgres {
    fn connection_string(&self, params: &ParamSet) -> String {
        let ssl_mode = if params.ssl_mode.is_empty() {
            DEFAULT_SSL_MODE
        } else {
            params.ssl_mode.as_str()
        };
        format!(
            "host={} port={} user={} password={} dbname={} sslmode={}",
            Self::kv_value(&params.host),
            Self::kv_value(&params.port),
            Self::kv_value(&params.user),
            Self::kv_value(&params.password),
            Self::kv_value(&params.db_name),
            Self::kv_value(ssl_mode),
        )
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    /// Every component is percent-encoded by `url`. The driver itself is
    /// configured field by field, so this form is only used for display.
    fn connection_string(&self, params: &ParamSet) -> String {
        let build = || -> Result<Url, String> {
            let mut url = Url::parse("mysql://localhost").map_err(|e| e.to_string())?;
            url.set_host(Some(&params.host)).map_err(|e| e.to_string())?;
            let port = params.port.parse::<u16>().map_err(|e| e.to_string())?;
            let rejected = |_| "url cannot carry port or credentials".to_string();
            url.set_port(Some(port)).map_err(rejected)?;
            url.set_username(&params.user).map_err(rejected)?;
            url.set_password(Some(&params.password)).map_err(rejected)?;
            url.path_segments_mut()
                .map_err(|_| "url cannot carry a path".to_string())?
                .clear()
                .push(&params.db_name);
            Ok(url)
        };

        match build() {
            Ok(url) => url.to_string(),
            Err(err) => {
                warn!(%err, "{} Cannot build MySQL DSN", params.label());
                String::new()
            }
        }
    }
}

/// The dialect for a known database type.
pub fn for_type(db_type: DbType) -> &'static dyn Dialect {
    match db_type {
        DbType::Postgres => &Postgres,
        DbType::MySql => &MySql,
    }
}

/// Builds the connection string for `params`. An unknown dialect yields an
/// empty string rather than an error.
pub fn connection_string(params: &ParamSet) -> String {
    match params.dialect() {
        Some(db_type) => for_type(db_type).connection_string(params),
        None => {
            warn!(db_type = %params.db_type, "{} Unknown db type", params.label());
            String::new()
        }
    }
}

/// Connection string with the password masked, for log output.
pub fn redacted_connection_string(params: &ParamSet) -> String {
    connection_string(&params.redacted())
}
