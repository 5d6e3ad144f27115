use connectors::sql::base::error::{ConnectorError, DbError};
use engine_config::settings::error::SettingsError;
use engine_core::error::StateStoreError;
use planner::error::QueryBuildError;
use thiserror::Error;

/// Errors surfaced to the host by the extraction and load entry points.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration could not be loaded, validated or persisted.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// A database connection could not be opened.
    #[error("Connector error: {0}")]
    Connector(#[from] ConnectorError),

    /// Db error.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// A record could not be turned into a statement.
    #[error("Query build error: {0}")]
    QueryBuild(#[from] QueryBuildError),

    #[error("State store error: {0}")]
    Store(#[from] StateStoreError),

    /// The load-side connection check at init failed.
    #[error("Connection test failed for {0}")]
    ConnectionTest(String),
}
