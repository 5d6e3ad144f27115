use crate::sql::base::{
    adapter::SqlAdapter,
    error::{ConnectorError, DbError},
    row::DbRow,
};
use async_trait::async_trait;
use model::{execution::params::ParamSet, records::record::FieldValue};
use mysql_async::{Conn, OptsBuilder, Row, TxOpts, prelude::*};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// A single MySQL connection, opened without a pool.
#[derive(Clone)]
pub struct MySqlAdapter {
    conn: Arc<Mutex<Conn>>,
}

impl MySqlAdapter {
    /// Connects with options built field by field, so credentials and names
    /// never pass through URL escaping.
    pub async fn connect(params: &ParamSet) -> Result<Self, ConnectorError> {
        let conn = Conn::new(Self::opts(params)?).await?;
        Ok(MySqlAdapter {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn opts(params: &ParamSet) -> Result<OptsBuilder, ConnectorError> {
        let port = params
            .port
            .parse::<u16>()
            .map_err(|_| ConnectorError::InvalidUrl(format!("invalid port '{}'", params.port)))?;

        Ok(OptsBuilder::default()
            .ip_or_hostname(params.host.as_str())
            .tcp_port(port)
            .user(Some(params.user.as_str()))
            .pass(Some(params.password.as_str()))
            .db_name(Some(params.db_name.as_str())))
    }
}

#[async_trait]
impl SqlAdapter for MySqlAdapter {
    async fn count(&self, sql: &str) -> Result<i64, DbError> {
        let mut conn = self.conn.lock().await;
        conn.query_first::<i64, _>(sql)
            .await?
            .ok_or_else(|| DbError::Query(format!("No rows returned by count: {sql}")))
    }

    async fn query_one(&self, sql: &str) -> Result<Option<Vec<FieldValue>>, DbError> {
        let mut conn = self.conn.lock().await;
        let row: Option<Row> = conn.query_first(sql).await?;
        Ok(row.as_ref().map(|row| DbRow::MySqlRow(row).to_fields()))
    }

    async fn exec_tx(&self, statements: &[String]) -> Result<(), DbError> {
        let mut conn = self.conn.lock().await;
        let mut tx = conn.start_transaction(TxOpts::default()).await?;
        for statement in statements {
            debug!("Executing: {}", statement);
            tx.query_drop(statement.as_str()).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), DbError> {
        let mut conn = self.conn.lock().await;
        conn.ping().await?;
        Ok(())
    }
}
