use async_trait::async_trait;
use connectors::sql::base::{
    adapter::{Connector, SqlAdapter},
    error::{ConnectorError, DbError},
};
use model::{core::value::Value, execution::params::ParamSet, records::record::FieldValue};
use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

/// Scripted database shared by every connection a [`FakeConnector`] opens.
/// Rows come back in queue order, one per `query_one`.
#[derive(Default)]
pub struct FakeDb {
    pub rows: Mutex<VecDeque<Vec<FieldValue>>>,
    pub queries: Mutex<Vec<String>>,
    pub committed: Mutex<Vec<String>>,
    pub fail_queries: Mutex<bool>,
    pub fail_writes_containing: Mutex<Option<String>>,
}

impl FakeDb {
    pub fn with_rows(rows: Vec<Vec<(&str, Value)>>) -> Arc<Self> {
        let db = Self::default();
        *db.rows.lock().unwrap() = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|(name, value)| FieldValue {
                        name: name.to_string(),
                        value,
                    })
                    .collect()
            })
            .collect();
        Arc::new(db)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn committed(&self) -> Vec<String> {
        self.committed.lock().unwrap().clone()
    }
}

struct FakeConn(Arc<FakeDb>);

#[async_trait]
impl SqlAdapter for FakeConn {
    async fn count(&self, sql: &str) -> Result<i64, DbError> {
        self.0.queries.lock().unwrap().push(sql.to_string());
        if *self.0.fail_queries.lock().unwrap() {
            return Err(DbError::Query("table is locked".into()));
        }
        Ok(self.0.rows.lock().unwrap().len() as i64)
    }

    async fn query_one(&self, sql: &str) -> Result<Option<Vec<FieldValue>>, DbError> {
        self.0.queries.lock().unwrap().push(sql.to_string());
        if *self.0.fail_queries.lock().unwrap() {
            return Err(DbError::Query("table is locked".into()));
        }
        Ok(self.0.rows.lock().unwrap().pop_front())
    }

    async fn exec_tx(&self, statements: &[String]) -> Result<(), DbError> {
        if let Some(bad) = self.0.fail_writes_containing.lock().unwrap().as_deref()
            && statements.iter().any(|s| s.contains(bad))
        {
            return Err(DbError::Transaction("rolled back".into()));
        }
        self.0
            .committed
            .lock()
            .unwrap()
            .extend(statements.iter().cloned());
        Ok(())
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

pub struct FakeConnector {
    pub db: Arc<FakeDb>,
    pub refuse: bool,
}

impl FakeConnector {
    pub fn new(db: Arc<FakeDb>) -> Arc<Self> {
        Arc::new(Self { db, refuse: false })
    }

    pub fn refusing() -> Arc<Self> {
        Arc::new(Self {
            db: Arc::new(FakeDb::default()),
            refuse: true,
        })
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn open(&self, _params: &ParamSet) -> Result<Box<dyn SqlAdapter>, ConnectorError> {
        if self.refuse {
            return Err(ConnectorError::InvalidUrl("connection refused".into()));
        }
        Ok(Box::new(FakeConn(self.db.clone())))
    }
}

pub fn config(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    let mut config: HashMap<String, String> = [
        ("db_host", "localhost"),
        ("db_port", "5432"),
        ("db_user", "app"),
        ("db_password", "secret"),
        ("db_name", "shop"),
        ("db_type", "postgres"),
        ("table_name", "t"),
        ("ordering_col", "id"),
        ("pk", "id"),
        ("query_frequency", "2"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in pairs {
        config.insert(k.to_string(), v.to_string());
    }
    config
}
