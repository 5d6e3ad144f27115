use crate::sql::base::{
    adapter::SqlAdapter,
    error::{ConnectorError, DbError},
    row::DbRow,
};
use async_trait::async_trait;
use model::records::record::FieldValue;
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_postgres::{Client, Config, NoTls, SimpleQueryMessage, config::SslMode, types::Type};
use tracing::{debug, error, warn};

/// A single PostgreSQL connection. The driver task spawned alongside it ends
/// when the adapter is dropped.
#[derive(Clone)]
pub struct PgAdapter {
    client: Arc<RwLock<Client>>,
}

impl PgAdapter {
    /// Connects with a libpq `key=value` string. `sslmode=disable` stays in
    /// plain text, `prefer` falls back to plain text when the handshake fails,
    /// and `require` insists on TLS.
    pub async fn connect(conn_str: &str) -> Result<Self, ConnectorError> {
        let config = conn_str
            .parse::<Config>()
            .map_err(|e| ConnectorError::InvalidUrl(e.to_string()))?;

        let client = match config.get_ssl_mode() {
            SslMode::Disable => Self::handshake(&config, false).await?,
            SslMode::Prefer => match Self::handshake(&config, true).await {
                Ok(client) => client,
                Err(err) => {
                    warn!(%err, "TLS handshake refused, connecting in plain text");
                    Self::handshake(&config, false).await?
                }
            },
            _ => Self::handshake(&config, true).await?,
        };

        Ok(PgAdapter {
            client: Arc::new(RwLock::new(client)),
        })
    }

    async fn handshake(config: &Config, tls: bool) -> Result<Client, ConnectorError> {
        if tls {
            let tls = MakeTlsConnector::new(TlsConnector::new()?);
            let (client, connection) = config.connect(tls).await?;
            tokio::spawn(async move {
                if let Err(err) = connection.await {
                    error!(%err, "Postgres TLS connection closed with error");
                }
            });
            Ok(client)
        } else {
            let (client, connection) = config.connect(NoTls).await?;
            tokio::spawn(async move {
                if let Err(err) = connection.await {
                    error!(%err, "Postgres connection closed with error");
                }
            });
            Ok(client)
        }
    }
}

#[async_trait]
impl SqlAdapter for PgAdapter {
    async fn count(&self, sql: &str) -> Result<i64, DbError> {
        let client = self.client.read().await;
        let row = client.query_one(sql, &[]).await?;
        Ok(row.try_get::<_, i64>(0)?)
    }

    /// Reads the row over the simple-query protocol so every column arrives
    /// as server text, whatever its type. Preparing the statement first only
    /// fetches the column types.
    async fn query_one(&self, sql: &str) -> Result<Option<Vec<FieldValue>>, DbError> {
        let client = self.client.read().await;
        let statement = client.prepare(sql).await?;
        let types: Vec<Type> = statement
            .columns()
            .iter()
            .map(|column| column.type_().clone())
            .collect();

        let messages = client.simple_query(sql).await?;
        let row = messages.iter().find_map(|message| match message {
            SimpleQueryMessage::Row(row) => Some(row),
            _ => None,
        });

        Ok(row.map(|row| {
            DbRow::PostgresRow {
                row,
                types: &types,
            }
            .to_fields()
        }))
    }

    async fn exec_tx(&self, statements: &[String]) -> Result<(), DbError> {
        let mut client = self.client.write().await;
        let tx = client.transaction().await?;
        for statement in statements {
            debug!("Executing: {}", statement);
            tx.batch_execute(statement).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), DbError> {
        let client = self.client.read().await;
        client.simple_query("SELECT 1").await?;
        Ok(())
    }
}
