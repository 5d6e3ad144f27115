use crate::sql::{
    base::{
        adapter::{Connector, SqlAdapter},
        error::ConnectorError,
    },
    mysql::adapter::MySqlAdapter,
    postgres::adapter::PgAdapter,
};
use async_trait::async_trait;
use model::execution::params::{DbType, ParamSet};
use planner::query::dialect::connection_string;
use tracing::debug;

#[derive(Clone)]
pub enum Adapter {
    MySql(MySqlAdapter),
    Postgres(PgAdapter),
}

impl Adapter {
    pub async fn sql(db_type: DbType, params: &ParamSet) -> Result<Self, ConnectorError> {
        match db_type {
            DbType::MySql => {
                let adapter = MySqlAdapter::connect(params).await?;
                Ok(Adapter::MySql(adapter))
            }
            DbType::Postgres => {
                let adapter = PgAdapter::connect(&connection_string(params)).await?;
                Ok(Adapter::Postgres(adapter))
            }
        }
    }

    pub fn into_sql(self) -> Box<dyn SqlAdapter> {
        match self {
            Adapter::MySql(adapter) => Box::new(adapter),
            Adapter::Postgres(adapter) => Box::new(adapter),
        }
    }
}

/// Opens real driver connections, one per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriverConnector;

#[async_trait]
impl Connector for DriverConnector {
    async fn open(&self, params: &ParamSet) -> Result<Box<dyn SqlAdapter>, ConnectorError> {
        let db_type = params
            .dialect()
            .ok_or_else(|| ConnectorError::UnsupportedDriver(params.db_type.clone()))?;
        debug!("{} Opening {} connection", params.label(), db_type);
        let adapter = Adapter::sql(db_type, params).await?;
        Ok(adapter.into_sql())
    }
}
