use engine_core::error::StateStoreError;
use thiserror::Error;

/// Errors raised when loading or validating an instance configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A mandatory key is absent or blank.
    #[error("No {field} defined for {plugin}")]
    MissingField { field: &'static str, plugin: String },

    /// A key is present but cannot be parsed.
    #[error("{field} is not numeric for {plugin}: '{value}'")]
    InvalidFormat {
        field: &'static str,
        plugin: String,
        value: String,
    },

    /// `db_type` names a database this bridge cannot talk to.
    #[error("Unknown db_type '{db_type}' defined for {plugin}")]
    UnsupportedDialect { db_type: String, plugin: String },

    /// The instance store could not be read or written.
    #[error("State store error: {0}")]
    Store(#[from] StateStoreError),

    /// The flush context is not a serialized configuration.
    #[error("Invalid flush context: {0}")]
    Context(#[from] serde_json::Error),
}
