use crate::sql::base::{
    adapter::{Connector, SqlAdapter},
    error::DbError,
};
use model::{
    core::{literal::to_literal, value::Value},
    execution::params::ParamSet,
    pagination::fetch::FetchResult,
    records::record::{FieldValue, GenericRecord},
};
use planner::query::generator::QueryGenerator;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Upper bound on every write transaction.
pub const TX_TIMEOUT: Duration = Duration::from_secs(1);

/// Whether `count_sql` reports any rows.
pub async fn existence_check(conn: &dyn SqlAdapter, count_sql: &str) -> Result<bool, DbError> {
    Ok(conn.count(count_sql).await? > 0)
}

/// Fetches at most one row and normalizes every column to its canonical text.
///
/// The sequencer column's text becomes the candidate cursor and the primary
/// key column's text is collected for a later delete. An empty result set is
/// not an error.
pub async fn select_one(
    conn: &dyn SqlAdapter,
    select_sql: &str,
    sequencer_column: &str,
    pk_column: &str,
) -> Result<FetchResult, DbError> {
    let Some(columns) = conn.query_one(select_sql).await? else {
        debug!("No row returned for: {}", select_sql);
        return Ok(FetchResult::empty());
    };

    let mut record = GenericRecord::with_capacity(columns.len());
    let mut keys = Vec::new();
    let mut cursor = String::new();

    for FieldValue { name, value } in columns {
        let text = to_literal(&value, false);
        if !sequencer_column.is_empty() && name == sequencer_column {
            cursor = text.clone();
        }
        if !pk_column.is_empty() && name == pk_column {
            keys.push(Value::String(text.clone()));
        }
        record.insert(name, Value::String(text));
    }

    debug!(columns = record.len(), cursor = %cursor, "Row fetched");
    Ok(FetchResult {
        record: Some(record),
        keys,
        cursor,
    })
}

/// Runs a batch of INSERTs in one bounded transaction; either every row is
/// committed or none is.
pub async fn insert(conn: &dyn SqlAdapter, insert_sql: &[String]) -> Result<(), DbError> {
    if insert_sql.is_empty() {
        return Ok(());
    }
    run_bounded(conn, insert_sql).await
}

/// Deletes every key in one bounded transaction; any failure rolls back the
/// whole batch.
pub async fn delete(
    conn: &dyn SqlAdapter,
    params: &ParamSet,
    keys: &[Value],
) -> Result<(), DbError> {
    if keys.is_empty() {
        return Ok(());
    }

    let generator = QueryGenerator::new(params);
    let statements: Vec<String> = keys
        .iter()
        .map(|key| generator.delete(&to_literal(key, true)))
        .collect();
    run_bounded(conn, &statements).await
}

async fn run_bounded(conn: &dyn SqlAdapter, statements: &[String]) -> Result<(), DbError> {
    match timeout(TX_TIMEOUT, conn.exec_tx(statements)).await {
        Ok(result) => result,
        Err(_) => Err(DbError::Timeout(TX_TIMEOUT)),
    }
}

/// Opens a connection for `params` and pings it.
pub async fn test_connection(connector: &dyn Connector, params: &ParamSet) -> bool {
    let conn = match connector.open(params).await {
        Ok(conn) => conn,
        Err(err) => {
            warn!("{} Connection test failed: {}", params.label(), err);
            return false;
        }
    };

    match conn.ping().await {
        Ok(()) => {
            info!("{} Connection test succeeded", params.label());
            true
        }
        Err(err) => {
            warn!("{} Connection test ping failed: {}", params.label(), err);
            false
        }
    }
}
