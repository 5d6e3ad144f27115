use crate::sql::base::error::{ConnectorError, DbError};
use async_trait::async_trait;
use model::{execution::params::ParamSet, records::record::FieldValue};

/// One open database connection, as seen by the executor.
#[async_trait]
pub trait SqlAdapter: Send + Sync {
    /// Runs a `COUNT(*)` statement and returns its single value.
    async fn count(&self, sql: &str) -> Result<i64, DbError>;

    /// Runs `sql` and returns the first row's columns in driver order, or
    /// `None` when the result set is empty.
    async fn query_one(&self, sql: &str) -> Result<Option<Vec<FieldValue>>, DbError>;

    /// Executes `statements` inside a single transaction. Nothing is kept
    /// unless every statement succeeds and the commit goes through; dropping
    /// the returned future before it completes rolls the transaction back.
    async fn exec_tx(&self, statements: &[String]) -> Result<(), DbError>;

    async fn ping(&self) -> Result<(), DbError>;
}

/// Opens short-lived connections for a configuration.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn open(&self, params: &ParamSet) -> Result<Box<dyn SqlAdapter>, ConnectorError>;
}
