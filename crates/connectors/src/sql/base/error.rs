use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// PostgreSQL driver error.
    #[error("Postgres error: {0}")]
    PgError(#[from] tokio_postgres::Error),

    /// MySQL driver error.
    #[error("MySQL error: {0}")]
    MySqlError(#[from] mysql_async::Error),

    /// A bounded transaction did not finish within its deadline.
    #[error("Transaction timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// A transaction could not be opened or committed.
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// The statement ran but its result was not what the caller expected.
    #[error("Query error: {0}")]
    Query(String),
}

/// Errors happening during adapter or connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Invalid connection string: {0}")]
    InvalidUrl(String),

    #[error("Unsupported db type: {0}")]
    UnsupportedDriver(String),

    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("Postgres connection failed: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("MySQL connection failed: {0}")]
    MySql(#[from] mysql_async::Error),
}
